//! Command table and dispatcher of the `geomdl` executable

pub mod command;
pub mod error;
mod help;
mod plot;

pub use command::*;
pub use error::*;

use std::io::Write;

/// Run the command named by `args[0]` with the remaining arguments and return the exit code
/// Every failure is printed to `out` as a single message
pub fn run(args: &[String], out: &mut dyn Write) -> i32 {
    match dispatch(args, out) {
        Ok(()) => 0,
        Err(e) => {
            log::debug!("command failed: {e:?}");
            let _ = writeln!(out, "{e}");
            1
        }
    }
}

fn dispatch(args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
    let Some((name, rest)) = args.split_first() else {
        return help::command_help(&[], out);
    };

    let command = find_command(name).ok_or_else(|| CommandError::UnknownCommand(name.clone()))?;
    if rest.len() < command.required_args {
        return Err(CommandError::MissingArguments {
            name: name.clone(),
            required: command.required_args,
        });
    }

    log::debug!("running {} with {:?}", command.name, rest);
    (command.handler)(rest, out)
}
