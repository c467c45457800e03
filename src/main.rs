use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use themepal::active::ThemeSourceChain;
use themepal::config::Settings;
use themepal::palette::{PaletteSource, ThemeTable};
use themepal::ui::preview;
use themepal::PaletteError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter
const LOG_ENV_VAR: &str = "THEMEPAL_LOG";

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    List,
    Palette {
        theme: Option<String>,
        count: Option<usize>,
    },
    Blend {
        foreground: bool,
        theme: String,
        fade: f64,
    },
    Show {
        theme: Option<String>,
        count: Option<usize>,
        ribbon: Option<bool>,
        hex: Option<bool>,
    },
    RenderTest {
        theme: Option<String>,
    },
}

fn print_help() {
    println!("themepal {} - Editor theme color palettes", VERSION);
    println!();
    println!("USAGE:");
    println!("    themepal [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help                   Print help information");
    println!("    -v, --version                Print version information");
    println!("    --list                       List available themes");
    println!("    --palette [THEME] [--count N]");
    println!("                                 Print the palette colors of a theme");
    println!("    --blend-bg <THEME> <FADE>    Background faded towards the text color");
    println!("    --blend-fg <THEME> <FADE>    Text color faded towards the background");
    println!("    --show [THEME] [--count N] [--no-ribbon] [--no-hex]");
    println!("                                 Preview a palette in the terminal");
    println!("    --render-test [THEME]        Print a rendered preview (80x10)");
    println!();
    println!("When THEME is omitted, ${} or the theme in ~/.themepal/settings.json is used.",
        themepal::active::THEME_ENV_VAR);
}

fn print_version() {
    println!("themepal {}", VERSION);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_count(value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| "--count requires a number".to_string())?;
    value
        .parse()
        .map_err(|_| format!("Invalid count: {}", value))
}

/// Theme name, then `--count N` / `--no-ribbon` / `--no-hex` flags in any order
fn parse_theme_options(
    args: &[String],
    allow_preview_flags: bool,
) -> Result<(Option<String>, Option<usize>, Option<bool>, Option<bool>), String> {
    let mut theme = None;
    let mut count = None;
    let mut ribbon = None;
    let mut hex = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" | "-n" => count = Some(parse_count(iter.next())?),
            "--no-ribbon" if allow_preview_flags => ribbon = Some(false),
            "--no-hex" if allow_preview_flags => hex = Some(false),
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag)),
            name => {
                if theme.is_some() {
                    return Err(format!("Unexpected argument: {}", name));
                }
                theme = Some(name.to_string());
            }
        }
    }
    Ok((theme, count, ribbon, hex))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(first) = args.first() else {
        return Ok(Command::Help);
    };
    let rest = &args[1..];

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help),
        "-v" | "--version" => Ok(Command::Version),
        "--list" => Ok(Command::List),
        "--palette" => {
            let (theme, count, _, _) = parse_theme_options(rest, false)?;
            Ok(Command::Palette { theme, count })
        }
        "--blend-bg" | "--blend-fg" => {
            if rest.len() != 2 {
                return Err(format!("{} requires <THEME> <FADE>", first));
            }
            let fade = rest[1]
                .parse::<f64>()
                .map_err(|_| format!("Invalid fade: {}", rest[1]))?;
            Ok(Command::Blend {
                foreground: first == "--blend-fg",
                theme: rest[0].clone(),
                fade,
            })
        }
        "--show" => {
            let (theme, count, ribbon, hex) = parse_theme_options(rest, true)?;
            Ok(Command::Show {
                theme,
                count,
                ribbon,
                hex,
            })
        }
        "--render-test" => {
            let (theme, _, _, _) = parse_theme_options(rest, false)?;
            Ok(Command::RenderTest { theme })
        }
        other => Err(format!("Unknown option: {}", other)),
    }
}

fn run(command: Command, table: &ThemeTable, settings: &Settings) -> Result<(), PaletteError> {
    let active = ThemeSourceChain::standard();

    match command {
        Command::Help => print_help(),
        Command::Version => print_version(),
        Command::List => {
            for theme in table.list_themes() {
                println!("{}", theme);
            }
        }
        Command::Palette { theme, count } => {
            let palette = table.palette_for(theme.as_deref(), count, &active)?;
            println!("theme       {}", palette.theme());
            println!("background  {}", palette.background());
            println!("base_text   {}", palette.base_text());
            for (rule, color) in palette.iter() {
                println!("{:<11} {}", rule, color);
            }
        }
        Command::Blend {
            foreground,
            theme,
            fade,
        } => {
            let source = PaletteSource::from(theme);
            let color = if foreground {
                table.blend_foreground(&source, fade, &active)?
            } else {
                table.blend_background(&source, fade, &active)?
            };
            println!("{}", color);
        }
        Command::Show {
            theme,
            count,
            ribbon,
            hex,
        } => {
            let palette = table.palette_for(theme.as_deref(), count, &active)?;
            preview::show(
                &palette,
                ribbon.unwrap_or(settings.preview.show_ribbon),
                hex.unwrap_or(settings.preview.show_hex),
            )?;
        }
        Command::RenderTest { theme } => {
            let palette = table.palette_for(theme.as_deref(), None, &active)?;
            let lines = preview::snapshot(
                &palette,
                80,
                10,
                settings.preview.show_ribbon,
                settings.preview.show_hex,
            )?;
            println!("=== Rendered Output (80x10) ===");
            for (y, line) in lines.iter().enumerate() {
                println!("Line {:2}: '{}'", y, line);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Use --help for usage information");
            return ExitCode::from(2);
        }
    };

    let settings = Settings::load();
    let custom;
    let table = match settings.custom_table() {
        Some(Ok(table)) => {
            custom = table;
            &custom
        }
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        None => match ThemeTable::bundled() {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    if let Err(e) = run(command, table, &settings) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
