//! Interactive console sky viewer.
//!
//! Loads a fixed-column bright star catalog once, then reads commands from
//! standard input one line at a time. `show` draws the sky for the current
//! view; the other commands move or zoom the view.
//!
//! Usage:
//!   skyview --catalog data.DAT
//!   skyview --catalog data.DAT --ra-hours 5 --ra-minutes 35 --dec -5 --show

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use skyview::backend::{AnsiTerminal, PlainText, RenderBackend};
use skyview::command::{Command, Confirmation, HelpTopic};
use skyview::session::InputError;
use skyview::{render_sky, Session, SkyConfig};
use starfield::catalogs::{BrightStarCatalog, StarCatalog};

#[derive(Parser, Debug)]
#[command(
    name = "skyview",
    about = "Shows a patch of the night sky as colored characters in the console",
    long_about = None
)]
struct Args {
    /// Path to the fixed-column star catalog
    #[arg(long, default_value = "data.DAT")]
    catalog: PathBuf,

    /// JSON file overriding grid size, magnitude cutoff and zoom limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial right ascension, whole hours
    #[arg(long)]
    ra_hours: Option<String>,

    /// Initial right ascension, whole minutes (used with --ra-hours)
    #[arg(long, default_value = "0")]
    ra_minutes: String,

    /// Initial declination, whole degrees
    #[arg(long, allow_hyphen_values = true)]
    dec: Option<String>,

    /// Initial viewing angle, whole degrees
    #[arg(long)]
    viewing_angle: Option<String>,

    /// Draw the sky once and exit instead of reading commands
    #[arg(long)]
    show: bool,

    /// Plain text output without terminal colors
    #[arg(long)]
    no_color: bool,
}

const ABOUT_TEXT: &str = "\
SkyView draws the part of the celestial sphere around a chosen direction,
as seen with a chosen viewing angle. The narrower the viewing angle, the
fainter the stars that show up. Symbols grow with brightness (. * # @) and
colors follow spectral class, from red M stars to blue O stars. Use the
console commands to turn, zoom, or set the view directly; enter help and
then commands for the list.";

/// Console front end: owns the session and the loaded catalog
struct Viewer<R, W> {
    input: R,
    output: W,
    session: Session,
    catalog: BrightStarCatalog,
    config: SkyConfig,
    backend: Box<dyn RenderBackend>,
}

impl<R: BufRead, W: Write> Viewer<R, W> {
    /// Print `prompt` and read one line. None at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn show(&mut self) -> io::Result<()> {
        let viewpoint = self.session.snapshot();
        debug!("Rendering view at {}", viewpoint.center);
        let grid = render_sky(&viewpoint, &self.catalog, &self.config);
        self.backend.write_grid(&grid, &mut self.output)?;
        writeln!(self.output)
    }

    fn report_input(&mut self, result: Result<(), InputError>, done: &str) -> io::Result<()> {
        match result {
            Ok(()) => writeln!(self.output, "\n{done}\n"),
            Err(e) => writeln!(self.output, "\nInput rejected: {e}. Please try again.\n"),
        }
    }

    fn print_config(&mut self) -> io::Result<()> {
        let (hours, minutes) = self.session.right_ascension_hm();
        writeln!(self.output, "\nCurrent view:\n")?;
        writeln!(self.output, "Right ascension is {hours} hours {minutes} minutes.")?;
        writeln!(
            self.output,
            "Declination is {} degrees.",
            self.session.declination_degrees()
        )?;
        writeln!(
            self.output,
            "Viewing angle is {} degrees.\n",
            self.session.viewing_angle_degrees()
        )
    }

    fn print_help(&mut self) -> io::Result<()> {
        let Some(answer) = self.ask("\nHelp topics: about, commands\ntopic: ")? else {
            return Ok(());
        };
        match answer.parse::<HelpTopic>() {
            Ok(HelpTopic::About) => writeln!(self.output, "\n{ABOUT_TEXT}\n"),
            Ok(HelpTopic::Commands) => {
                writeln!(self.output, "\nCommands:\n")?;
                for command in Command::ALL {
                    writeln!(self.output, "{:<22}{}", command.keyword(), command.summary())?;
                }
                writeln!(self.output)
            }
            Err(e) => writeln!(self.output, "\n{e}. Please try again.\n"),
        }
    }

    /// Handle one command. Returns false once the user confirms exit.
    fn handle(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Help => self.print_help()?,
            Command::Config => self.print_config()?,
            Command::Show => {
                writeln!(self.output, "\nDrawing the sky...\n")?;
                self.show()?;
            }
            Command::ZoomIn | Command::ZoomOut => {
                if command == Command::ZoomIn {
                    self.session.zoom_in();
                } else {
                    self.session.zoom_out();
                }
                writeln!(
                    self.output,
                    "\nViewing angle is now {} degrees.\n",
                    self.session.viewing_angle_degrees()
                )?;
            }
            Command::Up | Command::Down => {
                if command == Command::Up {
                    self.session.turn_up();
                } else {
                    self.session.turn_down();
                }
                writeln!(
                    self.output,
                    "\nDeclination is now {} degrees.\n",
                    self.session.declination_degrees()
                )?;
            }
            Command::Left | Command::Right => {
                if command == Command::Left {
                    self.session.turn_left();
                } else {
                    self.session.turn_right();
                }
                let (hours, minutes) = self.session.right_ascension_hm();
                writeln!(
                    self.output,
                    "\nRight ascension is now {hours} hours {minutes} minutes.\n"
                )?;
            }
            Command::SetRightAscension => {
                let Some(hours) = self.ask("\nRight ascension\nhours: ")? else {
                    return Ok(false);
                };
                let Some(minutes) = self.ask("minutes: ")? else {
                    return Ok(false);
                };
                let result = self.session.set_right_ascension(&hours, &minutes);
                self.report_input(result, "Right ascension set.")?;
            }
            Command::SetDeclination => {
                let Some(degrees) = self.ask("\nDeclination in degrees: ")? else {
                    return Ok(false);
                };
                let result = self.session.set_declination(&degrees);
                self.report_input(result, "Declination set.")?;
            }
            Command::SetViewingAngle => {
                let Some(degrees) = self.ask("\nViewing angle in degrees: ")? else {
                    return Ok(false);
                };
                let result = self.session.set_viewing_angle(&degrees);
                self.report_input(result, "Viewing angle set.")?;
            }
            Command::Exit => {
                let Some(answer) = self.ask("\nReally exit? y/n: ")? else {
                    return Ok(false);
                };
                match answer.parse::<Confirmation>() {
                    Ok(Confirmation::Yes) => {
                        writeln!(self.output, "\nGoodbye.\n")?;
                        return Ok(false);
                    }
                    Ok(Confirmation::No) => writeln!(self.output, "\nContinuing.\n")?,
                    Err(e) => writeln!(self.output, "\n{e}. Please try again.\n")?,
                }
            }
        }
        Ok(true)
    }

    fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "SkyView ready with {} stars. Enter help for a guide.\n",
            self.catalog.len()
        )?;
        loop {
            let Some(line) = self.ask("> ")? else {
                return Ok(());
            };
            if line.is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.handle(command)? {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(self.output, "\n{e}. Please try again.\n")?,
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SkyConfig::load_from_file(path).map_err(|e| {
            format!("Failed to load config from '{}': {}", path.display(), e)
        })?,
        None => SkyConfig::default(),
    };

    let catalog = BrightStarCatalog::load(&args.catalog);
    info!(
        "Catalog ready: {} stars, {} lines skipped",
        catalog.len(),
        catalog.skipped_records()
    );

    let mut session = Session::new(&config);
    if let Some(hours) = &args.ra_hours {
        session.set_right_ascension(hours, &args.ra_minutes)?;
    }
    if let Some(degrees) = &args.dec {
        session.set_declination(degrees)?;
    }
    if let Some(degrees) = &args.viewing_angle {
        session.set_viewing_angle(degrees)?;
    }

    let backend: Box<dyn RenderBackend> = if args.no_color {
        Box::new(PlainText)
    } else {
        Box::new(AnsiTerminal)
    };

    let stdin = io::stdin();
    let mut viewer = Viewer {
        input: stdin.lock(),
        output: io::stdout().lock(),
        session,
        catalog,
        config,
        backend,
    };

    if args.show {
        viewer.show()?;
    } else {
        viewer.run()?;
    }
    Ok(())
}
