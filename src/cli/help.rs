use std::io::Write;

use super::{find_command, CommandError, COMMANDS};

pub(crate) const HELP_USAGE: &str = "\
HELP: Displays GEOMDL-CLI help

Usage:

    geomdl help                 lists the available commands
    geomdl help {command}       displays the usage of a single command
";

pub(crate) const VERSION_USAGE: &str = "\
VERSION: Displays GEOMDL-CLI version

Usage:

    geomdl version
";

/// `geomdl help [command]`
pub(crate) fn command_help(args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
    if let Some(command) = args.first().and_then(|name| find_command(name)) {
        write!(out, "{}", command.usage)?;
        return Ok(());
    }
    if let Some(name) = args.first() {
        log::debug!("no usage for {name:?}, showing the general help");
    }
    write_usage(out)?;
    Ok(())
}

/// `geomdl version`
pub(crate) fn command_version(_args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "GEOMDL-CLI version {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

fn write_usage(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "GEOMDL-CLI - Plot NURBS curves and surfaces from the command line")?;
    writeln!(out)?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    writeln!(out, "    geomdl {{command}} {{arguments}}")?;
    writeln!(out)?;
    writeln!(out, "Available commands:")?;
    let width = COMMANDS.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for command in COMMANDS {
        writeln!(out, "    {:<width$}    {}", command.name, command.summary)?;
    }
    writeln!(out)?;
    writeln!(out, "Plot parameters:")?;
    writeln!(out, "    --index=n   plots the n-th shape of a multi shape file")?;
    writeln!(out, "    --delta=d   overrides the evaluation delta, 0.0 < d < 1.0")?;
    writeln!(out)?;
    writeln!(out, "Use `geomdl help {{command}}` for more information on a command.")?;
    Ok(())
}
