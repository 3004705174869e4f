mod app;
mod logging;

fn main() {
    logging::initialize(logging::LogDestination::Terminal);

    let options = match app::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: msgboard_app [--base <url>] [show | post <content> | remove <id>]");
            std::process::exit(2);
        }
    };

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    if let Err(err) = runtime.block_on(app::run(options)) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
