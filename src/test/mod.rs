mod config;
mod graph_primitives;
mod path_stats;
mod viz_export;
