use std::path::PathBuf;
use std::process;

use clap::Parser;

use carouscroll::commands;
use carouscroll::config::Config;
use carouscroll::logging::{self, LogTarget};
use carouscroll::tui::{self, ContentSource};

const HELP_TEXT: &str = r##"
  Markup
    Lines starting with "# " are section headings. Blank lines separate
    paragraphs. Every heading becomes a title on the carousel.

  Keys
    ←/h →/l        Previous / next section
    ↑/k ↓/j        Scroll one line
    PgUp PgDn      Scroll one page
    g G            Top / bottom
    r              Reload the file
    ?              Help
    q Esc          Quit

  Examples
    $ carouscroll
    $ carouscroll notes.txt
    $ carouscroll notes.txt --label Intro --label Setup
    $ carouscroll notes.txt --outline --width 100
    $ carouscroll --outline --json
"##;

#[derive(Parser)]
#[command(
    name = "carouscroll",
    version = env!("CARGO_PKG_VERSION"),
    about = "Page through a long document with a rotating title carousel",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Markup file to show (built-in sample when omitted)
    file: Option<PathBuf>,

    /// Carousel label for the next section, in order
    #[arg(short = 'l', long = "label", value_name = "TEXT")]
    labels: Vec<String>,

    /// Number of titles visible on the carousel
    #[arg(short = 's', long, value_name = "N")]
    slots: Option<usize>,

    /// Print the resolved title table and exit
    #[arg(short = 'o', long)]
    outline: bool,

    /// Print the outline as JSON
    #[arg(long, requires = "outline")]
    json: bool,

    /// Layout width used by --outline
    #[arg(long, value_name = "COLS", default_value_t = 80)]
    width: u16,

    /// Layout height used by --outline
    #[arg(long, value_name = "ROWS", default_value_t = 24)]
    height: u16,
}

fn main() {
    let cli = Cli::parse();

    let target = if cli.outline {
        LogTarget::Stderr
    } else {
        LogTarget::default_file()
    };
    if let Err(e) = logging::init(target) {
        eprintln!("{}", e);
    }

    let mut config = Config::load_or_default();
    if let Some(slots) = cli.slots {
        config.widget.visible_slots = slots.max(1);
    }

    let result = if cli.outline {
        commands::outline(
            cli.file.as_deref(),
            &cli.labels,
            config.widget.visible_slots,
            cli.width,
            cli.height,
            cli.json,
        )
    } else {
        let source = match cli.file {
            Some(path) => ContentSource::File(path),
            None => ContentSource::Demo { alternate: false },
        };
        let labels = (!cli.labels.is_empty()).then_some(cli.labels);
        tui::run(config, source, labels)
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
