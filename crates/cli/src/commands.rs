//! Parsing of the interactive command language.
//!
//! One command per line; the first word picks the command and the rest are
//! its arguments. Titles and search queries take the remainder of the line.

use anyhow::{anyhow, bail, Context, Result};
use catalog_client::Strategy;
use frontend::ClickTarget;
use session::MovieId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Rate {
        movie_id: MovieId,
        stars: i64,
        title: String,
    },
    Remove(MovieId),
    Details(MovieId),
    Close,
    Dismiss(ClickTarget),
    ModalRate(i64),
    Recommend(Strategy),
    Stats,
    Popular,
    Profile,
    Ratings,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <query>                 Search the catalog
  rate <movie id> <1-5> <title>  Rate (or re-rate) a movie
  remove <movie id>              Drop a rating
  details <movie id>             Open the detail view
  modal-rate <1-5>               Rate the movie in the detail view
  close                          Close the detail view
  dismiss [backdrop|content]     Click while the detail view is open
  recommend [--hybrid]           Ask for recommendations
  stats | popular                Reload dataset stats or popular movies
  profile | ratings              Show your profile or ratings
  help | quit";

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            // Blank queries are passed through; the session skips them
            "search" | "s" => Command::Search(rest.to_string()),
            "rate" => parse_rate(rest)?,
            "remove" | "rm" => Command::Remove(parse_movie_id(rest)?),
            "details" | "d" => Command::Details(parse_movie_id(rest)?),
            "close" => Command::Close,
            "dismiss" => Command::Dismiss(match rest {
                "" | "backdrop" => ClickTarget::Backdrop,
                "content" => ClickTarget::Content,
                other => bail!("Unknown click target '{}'", other),
            }),
            "modal-rate" => Command::ModalRate(parse_stars(rest)?),
            "recommend" | "rec" => Command::Recommend(match rest {
                "" => Strategy::Standard,
                "--hybrid" | "hybrid" => Strategy::Hybrid,
                other => bail!("Unknown recommendation option '{}'", other),
            }),
            "stats" => Command::Stats,
            "popular" => Command::Popular,
            "profile" => Command::Profile,
            "ratings" => Command::Ratings,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command '{}' (try 'help')", other),
        };
        Ok(Some(command))
    }
}

fn parse_rate(args: &str) -> Result<Command> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let movie_id = parse_movie_id(parts.next().unwrap_or(""))?;
    let stars = parse_stars(parts.next().unwrap_or(""))?;
    let title = parts.next().unwrap_or("").trim().to_string();
    Ok(Command::Rate {
        movie_id,
        stars,
        title,
    })
}

fn parse_movie_id(arg: &str) -> Result<MovieId> {
    if arg.is_empty() {
        return Err(anyhow!("Missing movie id"));
    }
    arg.parse()
        .with_context(|| format!("'{}' is not a movie id", arg))
}

/// Any integer; the range check belongs to the rating store
fn parse_stars(arg: &str) -> Result<i64> {
    if arg.is_empty() {
        return Err(anyhow!("Missing star rating"));
    }
    arg.parse()
        .with_context(|| format!("'{}' is not a star rating", arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# warm up").unwrap(), None);
    }

    #[test]
    fn test_rate_keeps_full_title() {
        assert_eq!(
            parse("rate 1 5 Toy Story (1995)"),
            Command::Rate {
                movie_id: 1,
                stars: 5,
                title: "Toy Story (1995)".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range_stars_still_parse() {
        // Rejected later, with a notice
        assert!(matches!(parse("rate 1 9 Heat"), Command::Rate { stars: 9, .. }));
        assert_eq!(parse("modal-rate 0"), Command::ModalRate(0));
    }

    #[test]
    fn test_search_takes_rest_of_line() {
        assert_eq!(parse("search  star wars "), Command::Search("star wars".to_string()));
        assert_eq!(parse("search"), Command::Search(String::new()));
    }

    #[test]
    fn test_recommend_strategies() {
        assert_eq!(parse("recommend"), Command::Recommend(Strategy::Standard));
        assert_eq!(parse("rec --hybrid"), Command::Recommend(Strategy::Hybrid));
        assert!(Command::parse("recommend --fast").is_err());
    }

    #[test]
    fn test_dismiss_targets() {
        assert_eq!(parse("dismiss"), Command::Dismiss(ClickTarget::Backdrop));
        assert_eq!(parse("dismiss content"), Command::Dismiss(ClickTarget::Content));
    }

    #[test]
    fn test_malformed_input() {
        assert!(Command::parse("rate").is_err());
        assert!(Command::parse("rate abc 4 Heat").is_err());
        assert!(Command::parse("rate 3 four Heat").is_err());
        assert!(Command::parse("details -1").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn test_case_insensitive_command_word() {
        assert_eq!(parse("QUIT"), Command::Quit);
        assert_eq!(parse("Details 42"), Command::Details(42));
    }
}
