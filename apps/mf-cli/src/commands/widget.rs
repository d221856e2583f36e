// widget.rs — Widget subcommands: snapshot, placeholder, timeline, info.

use clap::Subcommand;
use mf_goal::{DirectoryStore, FocusConfig, RefreshDispatcher, SystemClock};
use mf_widget::view::{DESCRIPTION, DISPLAY_NAME, WIDGET_KIND};
use mf_widget::{TimelineProvider, WidgetFamily, WidgetView};

#[derive(Subcommand)]
pub enum WidgetCommands {
    /// Render the widget with this month's goals.
    Snapshot {
        /// Widget size: small or medium.
        #[arg(long, default_value = "medium")]
        family: WidgetFamily,
    },
    /// Render the loading placeholder.
    Placeholder {
        /// Widget size: small or medium.
        #[arg(long, default_value = "medium")]
        family: WidgetFamily,
    },
    /// Print the timeline handed to the host scheduler, as JSON.
    Timeline,
    /// Describe the widget as it registers with the host.
    Info,
}

pub fn execute(cmd: &WidgetCommands, config: &FocusConfig) -> anyhow::Result<()> {
    match cmd {
        WidgetCommands::Snapshot { family } => {
            let view = WidgetView::from_config(*family, &config.display);
            print!("{}", view.render(&provider(config)?.snapshot()));
        }
        WidgetCommands::Placeholder { family } => {
            let view = WidgetView::from_config(*family, &config.display);
            print!("{}", view.render(&provider(config)?.placeholder()));
        }
        WidgetCommands::Timeline => {
            println!(
                "{}",
                serde_json::to_string_pretty(&provider(config)?.timeline())?
            );
        }
        WidgetCommands::Info => print_info(),
    }
    Ok(())
}

fn provider(
    config: &FocusConfig,
) -> anyhow::Result<TimelineProvider<DirectoryStore, RefreshDispatcher, SystemClock>> {
    Ok(TimelineProvider::new(super::open_store(config)?).with_reload(config.refresh.reload))
}

fn print_info() {
    let families: Vec<String> = WidgetFamily::SUPPORTED
        .iter()
        .map(|f| format!("{} ({} cols)", f, f.columns()))
        .collect();
    println!("Kind:        {}", WIDGET_KIND);
    println!("Name:        {}", DISPLAY_NAME);
    println!("Description: {}", DESCRIPTION);
    println!("Families:    {}", families.join(", "));
}
