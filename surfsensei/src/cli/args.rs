//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::models::{Accuracy, SessionInput, SkillLevel, TideDirection};

/// SurfSensei - pick the spot and the board for your next session
#[derive(Parser, Debug)]
#[command(name = "surfsensei")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model to use
    #[arg(long, global = true, env = "SURFSENSEI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Generative Language API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    /// Directory for feedback history (default: ~/.surfsensei)
    #[arg(long, global = true, env = "SURFSENSEI_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep feedback in memory only
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get a spot and board recommendation for a session
    Recommend {
        #[command(flatten)]
        session: SessionArgs,

        /// Fill swell, wind and tide from a live search before asking
        #[arg(long)]
        autofill: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up live conditions for a spot
    Autofill {
        /// Spot or location to search for
        #[arg(trailing_var_arg = true, required = true)]
        spots: Vec<String>,
    },

    /// Tell SurfSensei how the last recommendation turned out
    Feedback {
        /// Was the recommendation accurate?
        #[arg(value_enum)]
        accuracy: AccuracyArg,

        /// What was right or wrong (required when inaccurate)
        #[arg(trailing_var_arg = true)]
        comments: Vec<String>,
    },

    /// Show stored feedback
    History {
        /// Only show corrections (inaccurate with a comment)
        #[arg(long)]
        corrections: bool,
    },

    /// Start the web form
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "58232")]
        port: u16,

        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },
}

/// Session details. Numeric values are taken as typed.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Spots to compare, e.g. "Huntington Pier vs 56th Street Jetty"
    #[arg(short, long)]
    pub spots: Option<String>,

    /// Session time, YYYY-MM-DDTHH:MM (default: now)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Swell height in ft
    #[arg(long)]
    pub swell_height: Option<String>,

    /// Swell period in seconds
    #[arg(long)]
    pub swell_period: Option<String>,

    #[arg(long)]
    pub swell_direction: Option<String>,

    /// Wind speed in mph
    #[arg(long)]
    pub wind_speed: Option<String>,

    #[arg(long)]
    pub wind_direction: Option<String>,

    /// Tide height in ft
    #[arg(long)]
    pub tide_height: Option<String>,

    #[arg(long, value_enum)]
    pub tide: Option<TideArg>,

    #[arg(long, value_enum)]
    pub skill: Option<SkillArg>,

    /// Body weight in lbs
    #[arg(short, long)]
    pub weight: Option<String>,

    /// Boards you own, e.g. "6'0 31L shortboard, 5'8 fish"
    #[arg(short, long)]
    pub boards: Option<String>,
}

impl From<SessionArgs> for SessionInput {
    fn from(args: SessionArgs) -> Self {
        let defaults = Self::default();
        Self {
            session_date_time: args.time.unwrap_or(defaults.session_date_time),
            spots: args.spots.unwrap_or_default(),
            swell_height: args.swell_height.unwrap_or_default(),
            swell_period: args.swell_period.unwrap_or_default(),
            swell_direction: args.swell_direction.unwrap_or_default(),
            wind_speed: args.wind_speed.unwrap_or_default(),
            wind_direction: args.wind_direction.unwrap_or_default(),
            tide_height: args.tide_height.unwrap_or_default(),
            tide_direction: args.tide.map_or(defaults.tide_direction, Into::into),
            skill_level: args.skill.map_or(defaults.skill_level, Into::into),
            body_weight: args.weight.unwrap_or_default(),
            user_boards: args.boards.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TideArg {
    Rising,
    Falling,
}

impl From<TideArg> for TideDirection {
    fn from(arg: TideArg) -> Self {
        match arg {
            TideArg::Rising => Self::Rising,
            TideArg::Falling => Self::Falling,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SkillArg {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<SkillArg> for SkillLevel {
    fn from(arg: SkillArg) -> Self {
        match arg {
            SkillArg::Beginner => Self::Beginner,
            SkillArg::Intermediate => Self::Intermediate,
            SkillArg::Advanced => Self::Advanced,
        }
    }
}

/// Verdicts accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AccuracyArg {
    /// Spot on
    Accurate,
    /// Off base (comment required)
    Inaccurate,
}

impl From<AccuracyArg> for Accuracy {
    fn from(arg: AccuracyArg) -> Self {
        match arg {
            AccuracyArg::Accurate => Self::Accurate,
            AccuracyArg::Inaccurate => Self::Inaccurate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recommend_flags() {
        let cli = Cli::try_parse_from([
            "surfsensei",
            "recommend",
            "--spots",
            "Rincon vs C-Street",
            "--swell-height",
            "4",
            "--tide",
            "falling",
            "--skill",
            "advanced",
            "--boards",
            "6'2 step-up",
        ])
        .unwrap();

        let Commands::Recommend { session, autofill, json } = cli.command else {
            panic!("expected recommend");
        };
        assert!(!autofill);
        assert!(!json);

        let input = SessionInput::from(session);
        assert_eq!(input.spots, "Rincon vs C-Street");
        assert_eq!(input.swell_height, "4");
        assert_eq!(input.tide_direction, TideDirection::Falling);
        assert_eq!(input.skill_level, SkillLevel::Advanced);
        assert_eq!(input.user_boards, "6'2 step-up");
        assert!(input.wind_speed.is_empty());
    }

    #[test]
    fn parse_feedback() {
        let cli = Cli::try_parse_from([
            "surfsensei",
            "feedback",
            "inaccurate",
            "wind",
            "was",
            "onshore",
        ])
        .unwrap();
        let Commands::Feedback { accuracy, comments } = cli.command else {
            panic!("expected feedback");
        };
        assert!(matches!(accuracy, AccuracyArg::Inaccurate));
        assert_eq!(comments.join(" "), "wind was onshore");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["surfsensei", "history", "--no-persist"]).unwrap();
        assert!(cli.no_persist);
    }
}
