//! Filter flags of `accuknox log network`.
//!
//! `--not` only applies to the filter flag following it. clap collects the
//! values per flag, so the command-line order is rebuilt from the indices it
//! records for each occurrence.

use clap::{ArgAction, ArgMatches};
use log::warn;

use accuknox_filter::{Dimension, Direction, FilterBuilder, FilterError, FilterSet};

const NOT_ID: &str = "not";

const FILTER_IDS: &[(&str, Direction, Dimension)] = &[
    ("from_ip", Direction::Source, Dimension::Ip),
    ("to_ip", Direction::Destination, Dimension::Ip),
    ("from_pod", Direction::Source, Dimension::Pod),
    ("to_pod", Direction::Destination, Dimension::Pod),
    ("from_fqdn", Direction::Source, Dimension::Fqdn),
    ("to_fqdn", Direction::Destination, Dimension::Fqdn),
    ("from_label", Direction::Source, Dimension::Label),
    ("to_label", Direction::Destination, Dimension::Label),
    ("from_port", Direction::Source, Dimension::Port),
    ("to_port", Direction::Destination, Dimension::Port),
    ("from_service", Direction::Source, Dimension::Service),
    ("to_service", Direction::Destination, Dimension::Service),
    ("verdict", Direction::Source, Dimension::Verdict),
];

#[derive(clap::Args, Debug, Default)]
pub struct FilterArgs {
    /// Exclude the flows matching the next filter flag.
    // One index per occurrence, `ArgAction::Count` only records the last one.
    #[arg(
        long,
        action = ArgAction::Append,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub not: Vec<bool>,

    #[arg(long, value_name = "IP")]
    pub from_ip: Vec<String>,
    #[arg(long, value_name = "IP")]
    pub to_ip: Vec<String>,
    /// Source pod, `[namespace/]pod`.
    #[arg(long, value_name = "POD")]
    pub from_pod: Vec<String>,
    #[arg(long, value_name = "POD")]
    pub to_pod: Vec<String>,
    #[arg(long, value_name = "FQDN")]
    pub from_fqdn: Vec<String>,
    #[arg(long, value_name = "FQDN")]
    pub to_fqdn: Vec<String>,
    #[arg(long, value_name = "LABEL")]
    pub from_label: Vec<String>,
    #[arg(long, value_name = "LABEL")]
    pub to_label: Vec<String>,
    #[arg(long, value_name = "PORT")]
    pub from_port: Vec<String>,
    #[arg(long, value_name = "PORT")]
    pub to_port: Vec<String>,
    #[arg(long, value_name = "SERVICE")]
    pub from_service: Vec<String>,
    #[arg(long, value_name = "SERVICE")]
    pub to_service: Vec<String>,
    /// FORWARDED, DROPPED, ERROR, AUDIT, REDIRECTED, TRACED or TRANSLATED.
    #[arg(long, value_name = "VERDICT")]
    pub verdict: Vec<String>,
}

enum Token<'a> {
    Not,
    Criterion(Direction, Dimension, &'a str),
}

/// Builds the filter set from the matches of a command carrying [FilterArgs].
///
/// A trailing `--not` with no filter flag after it is ignored.
pub fn filters_from_matches(matches: &ArgMatches) -> Result<FilterSet, FilterError> {
    let mut tokens = Vec::new();

    if let Some(indices) = matches.indices_of(NOT_ID) {
        tokens.extend(indices.map(|index| (index, Token::Not)));
    }
    for &(id, direction, dimension) in FILTER_IDS {
        let (Some(indices), Some(values)) = (matches.indices_of(id), matches.get_many::<String>(id))
        else {
            continue;
        };
        tokens.extend(
            indices
                .zip(values)
                .map(|(index, value)| (index, Token::Criterion(direction, dimension, value))),
        );
    }
    tokens.sort_by_key(|(index, _)| *index);

    let mut builder = FilterBuilder::new();
    for (_, token) in tokens {
        match token {
            Token::Not => {
                builder.not();
            }
            Token::Criterion(direction, dimension, value) => {
                builder.push(direction, dimension, value)?;
            }
        }
    }
    if builder.is_negating() {
        warn!("--not without a following filter flag is ignored");
    }

    Ok(builder.build())
}
