use std::sync::Arc;

use forwardcache::acceptor::run_acceptor;
use forwardcache::cache::ProxyCache;
use forwardcache::queue::HandoffQueue;
use forwardcache::worker::spawn_workers;
use forwardcache::Config;

fn usage_and_exit(program: &str) -> ! {
    eprintln!("usage: {program} <port>");
    std::process::exit(1);
}

fn parse_port(program: &str, args: &[String]) -> u16 {
    if args.len() != 1 {
        usage_and_exit(program);
    }
    match args[0].parse::<u16>() {
        Ok(port) => port,
        Err(_) => usage_and_exit(program),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = std::env::args().collect();
    let program = args.remove(0);
    let port = parse_port(&program, &args);

    let config = Arc::new(Config::new(port));
    let cache = ProxyCache::new(config.max_cache_size, config.max_object_size);
    let queue = Arc::new(HandoffQueue::new(config.sbufsize));

    tracing::info!(
        "forwardcache starting: port={port} nthreads={} sbufsize={} max_cache_size={} max_object_size={}",
        config.nthreads,
        config.sbufsize,
        config.max_cache_size,
        config.max_object_size,
    );

    let _workers = spawn_workers(queue.clone(), cache, config.clone());

    if let Err(e) = run_acceptor(config.port, queue).await {
        tracing::error!("acceptor failed: {e}");
        std::process::exit(1);
    }
}
