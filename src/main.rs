use avl_collections::avl_tree::{try_min_nodes_for_height, AvlTree};
use log::{info, warn, LevelFilter};
use simplelog::{Config, SimpleLogger};
use std::env;

const LOG_LEVEL_VAR: &str = "AVL_LOG_LEVEL";

fn log_level() -> LevelFilter {
    match env::var(LOG_LEVEL_VAR) {
        Ok(level) => level.parse().unwrap_or(LevelFilter::Info),
        Err(_) => LevelFilter::Info,
    }
}

fn main() {
    if let Err(err) = SimpleLogger::init(log_level(), Config::default()) {
        eprintln!("Error: could not install logger: {}", err);
    }

    let mut tree = AvlTree::new();
    for arg in env::args().skip(1) {
        match arg.parse::<i32>() {
            Ok(key) => {
                if !tree.add(key) {
                    warn!("skipping duplicate key {}", key);
                }
            },
            Err(err) => warn!("skipping {:?}: {}", arg, err),
        }
    }

    info!("keys: {:?}", tree);
    for key in &tree {
        info!("key {} at depth {}", key, tree.contains(key));
    }

    let height = tree.height();
    match try_min_nodes_for_height(height) {
        Ok(min_nodes) => info!(
            "height {} needs at least {} nodes, tree has {}",
            height,
            min_nodes,
            tree.size(),
        ),
        Err(err) => info!("no lower bound for this tree: {}", err),
    }
}
