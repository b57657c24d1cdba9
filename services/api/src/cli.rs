use crate::demo::{
    run_demo, run_driver_history, run_driver_list, run_driver_profile, DemoArgs, HistoryArgs,
    ListArgs, ProfileArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use driver_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Driver Hub",
    about = "Browse the driver roster and serve the driver dashboard API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect drivers from the command line
    Drivers {
        #[command(subcommand)]
        command: DriversCommand,
    },
    /// Walk through every profile tab of the first driver
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DriversCommand {
    /// List drivers matching a search and status filter
    List(ListArgs),
    /// Show one profile tab for a driver
    Profile(ProfileArgs),
    /// Show or export a driver's activity timeline
    History(HistoryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Drivers { command } => match command {
            DriversCommand::List(args) => run_driver_list(args),
            DriversCommand::Profile(args) => run_driver_profile(args),
            DriversCommand::History(args) => run_driver_history(args),
        },
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use driver_hub::drivers::{DateRange, ProfileTab};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn history_flags_parse_into_filters() {
        let cli = Cli::try_parse_from([
            "driver-hub",
            "drivers",
            "history",
            "1",
            "--type",
            "payment",
            "--range",
            "week",
            "--now",
            "2024-01-15",
            "--csv",
        ])
        .expect("arguments parse");

        let Some(Command::Drivers {
            command: DriversCommand::History(args),
        }) = cli.command
        else {
            panic!("expected drivers history");
        };
        assert_eq!(args.id, "1");
        assert_eq!(args.kind.as_str(), "payment");
        assert_eq!(args.range, DateRange::Week);
        assert!(args.csv);
    }

    #[test]
    fn unknown_tab_is_rejected() {
        assert!(Cli::try_parse_from(["driver-hub", "drivers", "profile", "1", "--tab", "billing"])
            .is_err());
        let cli = Cli::try_parse_from(["driver-hub", "drivers", "profile", "1"])
            .expect("arguments parse");
        let Some(Command::Drivers {
            command: DriversCommand::Profile(args),
        }) = cli.command
        else {
            panic!("expected drivers profile");
        };
        assert_eq!(args.tab, ProfileTab::Overview);
    }
}
