use std::process::ExitCode;

use backend::config::WindowConfig;
use backend::render_loop;
use backend::system::System;

fn main() -> ExitCode {
    env_logger::init();

    let config = WindowConfig::default();
    match render_loop::run(&config, System::new) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("setup failed during {:?}", e.stage());
            eprintln!("{e}");
            ExitCode::from(e.exit_status())
        }
    }
}
