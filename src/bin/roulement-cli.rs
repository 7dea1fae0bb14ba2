#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use roulement::{
    calendar::{day_of_week, CachedHolidays, DayClassifier, FileHolidaySource},
    io::{self, EmployeeRecord, RosterFile},
    scheduler::Planner,
    storage::{JsonStorage, Storage},
    RestDayCalendar, WeekendClassifier,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning mensuel (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le planning d'un mois à partir d'un fichier de membres
    Generate {
        /// Fichier JSON des membres
        #[arg(long, default_value = "roster.json")]
        roster: String,
        /// Année cible (défaut : celle du fichier, sinon l'année courante)
        #[arg(long)]
        year: Option<i32>,
        /// Mois cible 1..=12 (défaut : celui du fichier, sinon le mois courant)
        #[arg(long)]
        month: Option<u32>,
        /// Ignorer les fériés : seuls les week-ends sont des jours de repos
        #[arg(long)]
        weekends_only: bool,
        /// Fichier de fériés (format holidays-jp) ; défaut : jeu embarqué
        #[arg(long)]
        holidays: Option<String>,
        /// Export JSON du planning (optionnel)
        #[arg(long)]
        out_json: Option<String>,
        /// Export CSV du tableau de présence (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Lister les fériés d'une année
    Holidays {
        #[arg(long)]
        year: i32,
        /// Fichier de fériés ; défaut : jeu embarqué
        #[arg(long)]
        holidays: Option<String>,
    },

    /// Écrire un fichier de membres d'exemple
    Sample {
        #[arg(long, default_value = "roster.json")]
        out: String,
    },
}

const WEEKDAYS: [&str; 7] = ["dim", "lun", "mar", "mer", "jeu", "ven", "sam"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            roster,
            year,
            month,
            weekends_only,
            holidays,
            out_json,
            out_csv,
        } => {
            let imported = io::import_employees_json(&roster)?;
            let now = Utc::now();
            let year = year.or(imported.year).unwrap_or_else(|| now.year());
            let month = month.or(imported.month).unwrap_or_else(|| now.month());

            let classifier: Box<dyn DayClassifier> = if weekends_only {
                Box::new(WeekendClassifier)
            } else {
                Box::new(load_calendar(holidays.as_deref()))
            };

            let planner = Planner::new();
            let generated =
                planner.generate(&imported.employees, year, month, classifier.as_ref())?;

            for day in 1..=generated.schedule.days_in_month() {
                let weekday = day_of_week(year, month, day)
                    .map(|d| WEEKDAYS[d as usize])
                    .unwrap_or("?");
                let kind = if classifier.is_rest_day(year, month, day) {
                    "repos"
                } else {
                    "ouvré"
                };
                let names: Vec<&str> = generated
                    .schedule
                    .assigned(day)
                    .iter()
                    .filter_map(|id| {
                        imported
                            .employees
                            .iter()
                            .find(|e| &e.id == id)
                            .map(|e| e.name.as_str())
                    })
                    .collect();
                println!("{year}-{month:02}-{day:02} {weekday} | {kind} | {}", names.join(", "));
            }

            if let Some(path) = out_json {
                io::export_schedule_json(path, &generated.schedule, &imported.employees)?;
            }
            if let Some(path) = out_csv {
                io::export_attendance_csv(path, &generated.schedule, &imported.employees)?;
            }

            if generated.diagnostics.is_empty() {
                0
            } else {
                for diag in &generated.diagnostics {
                    eprintln!("warning: {diag}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Holidays { year, holidays } => {
            let calendar = load_calendar(holidays.as_deref());
            for (month, day, name) in calendar.holidays().year_holidays(year) {
                println!("{year}-{month:02}-{day:02} {name}");
            }
            0
        }
        Commands::Sample { out } => {
            let storage = JsonStorage::open(&out)?;
            storage.save(&sample_roster())?;
            println!("Sample roster written to {out}");
            0
        }
    };

    std::process::exit(code);
}

/// Calendrier de repos : fichier de fériés si fourni (avec secours embarqué
/// en cas d'échec), sinon jeu embarqué.
fn load_calendar(source: Option<&str>) -> RestDayCalendar {
    match source {
        Some(path) => {
            let mut cache = CachedHolidays::with_builtin_fallback(FileHolidaySource::new(path));
            let set = cache.get(Utc::now()).clone();
            if cache.is_using_fallback() {
                eprintln!("warning: holidays source unavailable, using built-in fallback");
            }
            RestDayCalendar::new(set)
        }
        None => RestDayCalendar::builtin(),
    }
}

/// Jeu de démonstration de l'application d'origine (août 2025).
fn sample_roster() -> RosterFile {
    RosterFile {
        year: Some(2025),
        month: Some(7),
        employees: vec![
            EmployeeRecord {
                name: "test1".to_string(),
                required_days: 19,
                unavailable_days: vec![],
            },
            EmployeeRecord {
                name: "テスト1".to_string(),
                required_days: 22,
                unavailable_days: vec![1, 3, 5, 11, 17],
            },
        ],
    }
}
