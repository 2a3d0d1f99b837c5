use lisplet::environment::Environment;
use lisplet::{cmdline, interpreter};

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();
    let interface = cmdline::setup()?;
    let env = Environment::global();
    cmdline::repl(&interface, |line| interpreter::rep(line, &env));
    cmdline::save_history(&interface)
}
