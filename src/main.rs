// SPDX-License-Identifier: MPL-2.0
use memories_bed::app::{self, Flags};
use memories_bed::config::paths;
use memories_bed::logging;

const USAGE: &str = "usage: memories-bed [--lang <id>] [--config-dir <dir>] [--verbose] <CODE|URL>";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(());
    }

    let verbose = args.contains(["-v", "--verbose"]);
    logging::init(verbose);

    let lang = match args.opt_value_from_str("--lang") {
        Ok(lang) => lang,
        Err(err) => {
            tracing::warn!(%err, "ignoring --lang");
            None
        }
    };
    let config_dir: Option<String> = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            tracing::warn!(%err, "ignoring --config-dir");
            None
        }
    };
    let code = args
        .finish()
        .into_iter()
        .next()
        .and_then(|arg| arg.into_string().ok());

    paths::init_cli_override(config_dir.clone());

    app::run(Flags {
        lang,
        code,
        config_dir,
    })
}
