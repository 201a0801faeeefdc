use log::{debug, error};

use pn2fast::driver;
use pn2fast::options::Options;

fn main() {
    let mut flags = shellwords::split(&std::env::var("PN_FLAGS").unwrap_or_default())
        .unwrap_or_else(|err| {
            eprintln!("invalid PN_FLAGS: {err}");
            Vec::new()
        });
    flags.extend(std::env::args().skip(1));

    let options = match Options::parse_from_args(&flags) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let default_level = if options.verbose { "debug" } else { "warn" };
    let env = env_logger::Env::new()
        .filter_or("PN_LOG", default_level)
        .write_style("PN_LOG_STYLE");
    env_logger::init_from_env(env);

    debug!("PN options: {:?}", options);

    if let Err(err) = driver::run(&options) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
