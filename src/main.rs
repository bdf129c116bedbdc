use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use zecharge::display::render_schedules;
use zecharge::logging::init_logging;
use zecharge::schedule::DAYS;
use zecharge::{ChargeSchedules, Config, ScheduleEdits, TimezoneOffset};

/// Show and edit charge schedules saved as charging-settings JSON
#[derive(Parser, Debug)]
#[command(name = "zecharge", version = env!("APP_VERSION"))]
struct Cli {
    /// Configuration file (defaults to the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show and take times as vehicle (UTC) times
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every schedule in FILE
    Show { file: PathBuf },
    /// Change one schedule's charges, validate and write the result
    Edit(EditArgs),
    /// Make schedule ID the only activated one
    Activate {
        file: PathBuf,
        id: u32,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct EditArgs {
    file: PathBuf,

    /// Schedule to edit (config `schedule.default_schedule_id` when omitted)
    #[arg(long)]
    id: Option<u32>,

    /// Write here instead of overwriting FILE
    #[arg(long)]
    output: Option<PathBuf>,

    /// Monday charge as HHMM,DURATION
    #[arg(long, value_name = "HHMM,DURATION")]
    monday: Option<String>,
    #[arg(long, value_name = "HHMM,DURATION")]
    tuesday: Option<String>,
    #[arg(long, value_name = "HHMM,DURATION")]
    wednesday: Option<String>,
    #[arg(long, value_name = "HHMM,DURATION")]
    thursday: Option<String>,
    #[arg(long, value_name = "HHMM,DURATION")]
    friday: Option<String>,
    #[arg(long, value_name = "HHMM,DURATION")]
    saturday: Option<String>,
    #[arg(long, value_name = "HHMM,DURATION")]
    sunday: Option<String>,
}

impl EditArgs {
    fn edits(&self) -> zecharge::Result<ScheduleEdits> {
        let values = [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ];
        ScheduleEdits::from_day_values(DAYS.into_iter().zip(values.map(|v| v.as_deref())))
    }
}

async fn read_schedules(path: &Path) -> Result<ChargeSchedules> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(ChargeSchedules::from_settings_json(&raw)?)
}

async fn write_schedules(path: &Path, schedules: &ChargeSchedules) -> Result<()> {
    let body = schedules.to_settings_json()?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} charge schedule(s) to {}", schedules.len(), path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    config.validate()?;
    init_logging(&config.logging)?;

    let offset: Option<TimezoneOffset> = if cli.utc {
        None
    } else {
        config.display_offset()?
    };

    let schedules = match cli.command {
        Command::Show { file } => read_schedules(&file).await?,
        Command::Edit(args) => {
            let mut schedules = read_schedules(&args.file).await?;
            let id = args.id.unwrap_or(config.schedule.default_schedule_id);
            schedules.update(id, &args.edits()?, offset)?;
            write_schedules(args.output.as_deref().unwrap_or(&args.file), &schedules).await?;
            schedules
        }
        Command::Activate { file, id, output } => {
            let mut schedules = read_schedules(&file).await?;
            schedules.activate(id)?;
            write_schedules(output.as_deref().unwrap_or(&file), &schedules).await?;
            schedules
        }
    };

    println!("{}", render_schedules(&schedules, offset)?);
    Ok(())
}
