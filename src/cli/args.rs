use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pokedex",
    version,
    about = "terminal directory and detail viewer for the PokeAPI catalog",
    long_about = "Pokedex loads every record of the catalog in parallel, lists them in order and shows stats for the one you select.\n\nSession input:\n  <text>       filter the list (empty line clears the filter)\n  :s <N>       show the detail for entry N\n  :l           list the visible entries again\n  :q           quit\n\nExamples:\n  pokedex\n  pokedex --filter char --select 4 --once\n  pokedex --count 9 --output dex.json\n  pokedex --config ~/.pokedex/config.yml"
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "color",
        help_heading = "Output",
        help = "Force colored output even when stdout is not a terminal (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the loaded index to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Index export format (text or json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (YAML)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a default config to ~/.pokedex/config.yml (if absent) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'u',
        long = "api-url",
        visible_alias = "api",
        value_name = "URL",
        help_heading = "Input",
        help = "Base URL of the API (records are read from <URL>/pokemon/<id>/)."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 'N',
        long = "count",
        value_name = "N",
        help_heading = "Input",
        help = "Number of records to load, ids 1..=N."
    )]
    pub count: Option<u32>,

    #[arg(
        short = 'p',
        long = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds (0 waits forever)."
    )]
    pub timeout: Option<usize>,

    #[arg(
        long = "user-agent",
        value_name = "AGENT",
        help_heading = "HTTP",
        help = "User-Agent header sent with every request."
    )]
    pub user_agent: Option<String>,

    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help_heading = "Performance",
        help = "Number of runtime worker threads."
    )]
    pub workers: Option<usize>,

    #[arg(
        short = 'f',
        long = "filter",
        value_name = "TEXT",
        help_heading = "Session",
        help = "Initial filter applied to the list."
    )]
    pub filter: Option<String>,

    #[arg(
        short = 's',
        long = "select",
        value_name = "N",
        help_heading = "Session",
        help = "Show the detail for entry N after loading."
    )]
    pub select: Option<u32>,

    #[arg(
        long = "once",
        help_heading = "Session",
        help = "Exit after the initial filter/select instead of reading input."
    )]
    pub once: bool,
}
