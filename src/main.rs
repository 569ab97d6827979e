use std::io::Write;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("GEOMDL_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut stdout = std::io::stdout().lock();
    let code = geomdl_cli::run(&args, &mut stdout);
    let _ = stdout.flush();
    std::process::exit(code);
}
