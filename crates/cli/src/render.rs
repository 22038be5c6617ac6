//! Terminal drawing of the session surface.

use colored::Colorize;
use frontend::{Change, Notice, NoticeKind, RegionState, Renderer, SurfaceView};
use session::{ProfileSnapshot, Rating, RECOMMENDATION_THRESHOLD};

/// Prints the part of the surface that changed
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn name(&self) -> &str {
        "terminal"
    }

    fn render(&self, change: Change, view: &SurfaceView<'_>) {
        let surface = &view.surface;
        match change {
            Change::Ratings => print_ratings(
                surface.ratings(),
                surface.visibility().show_recommendations,
            ),
            Change::Stats => match surface.stats().state() {
                RegionState::Populated(stats) => println!(
                    "{} {} movies, {} ratings from {} users (avg {:.2})",
                    "Dataset:".bold().blue(),
                    stats.total_movies,
                    stats.total_ratings,
                    stats.unique_users,
                    stats.avg_rating
                ),
                state => print_pending("Dataset", state),
            },
            Change::Popular => match surface.popular().state() {
                RegionState::Populated(movies) => {
                    println!("{}", "Popular movies:".bold().blue());
                    for movie in movies {
                        println!(
                            "  {} {} ({} ratings)",
                            format!("[{}]", movie.movie_id).dimmed(),
                            movie.title,
                            movie.rating_count
                        );
                    }
                }
                state => print_pending("Popular movies", state),
            },
            Change::Search => match surface.search().state() {
                RegionState::Populated(results) if results.hits.is_empty() => {
                    println!("No movies match '{}'", results.query)
                }
                RegionState::Populated(results) => {
                    println!("{}", format!("Results for '{}':", results.query).bold().blue());
                    for hit in &results.hits {
                        println!(
                            "  {} {} {}",
                            format!("[{}]", hit.movie_id).dimmed(),
                            hit.title,
                            hit.genres.replace('|', ", ").cyan()
                        );
                    }
                }
                state => print_pending("Search", state),
            },
            Change::Modal => {
                let modal = surface.modal();
                if !modal.is_open() {
                    return;
                }
                match modal.details().state() {
                    RegionState::Populated(details) => {
                        println!("{}", details.title.bold());
                        println!("  Genres: {}", details.genre_list().join(", ").cyan());
                        println!(
                            "  Average rating {:.2} from {} ratings",
                            details.avg_rating, details.rating_count
                        );
                    }
                    state => print_pending("Details", state),
                }
                match modal.similar().state() {
                    RegionState::Populated(similar) if !similar.is_empty() => {
                        println!("  {}", "Similar movies:".bold());
                        for movie in similar {
                            println!(
                                "    {} {} (avg {:.2}, {} genres in common)",
                                format!("[{}]", movie.movie_id).dimmed(),
                                movie.title,
                                movie.avg_rating,
                                movie.common_genres
                            );
                        }
                    }
                    RegionState::Error(message) => println!("  {}", message.red()),
                    _ => {}
                }
            }
            Change::Recommendations => match view.recommendations.state() {
                RegionState::Populated(panel) => {
                    println!(
                        "{}",
                        format!("Recommended for you ({}):", panel.strategy).bold().blue()
                    );
                    for (rank, rec) in panel.items.iter().enumerate() {
                        println!(
                            "  {}. {} {} - Score: {:.2}",
                            (rank + 1).to_string().green(),
                            rec.title,
                            format!("[{}]", rec.movie_id).dimmed(),
                            rec.score
                        );
                    }
                }
                state => print_pending("Recommendations", state),
            },
            // Printed by the command loop once drained
            Change::Notices => {}
        }
    }
}

fn print_pending<T>(label: &str, state: &RegionState<T>) {
    match state {
        RegionState::Loading => println!("{}", format!("{}: loading...", label).dimmed()),
        RegionState::Error(message) => println!("{}", message.red()),
        RegionState::Idle | RegionState::Populated(_) => {}
    }
}

fn print_ratings(ratings: &[Rating], show_recommendations: bool) {
    if ratings.is_empty() {
        println!("{}", "No ratings yet. Search for a movie and rate it.".dimmed());
        return;
    }

    println!("{}", format!("Your ratings ({}):", ratings.len()).bold().blue());
    for rating in ratings {
        println!(
            "  {} {} {}",
            format!("[{}]", rating.movie_id).dimmed(),
            rating.title,
            rating.rating.to_string().yellow()
        );
    }

    if show_recommendations {
        println!("{}", "Recommendations available: 'recommend [--hybrid]'".green());
    } else {
        println!(
            "{}",
            format!(
                "Rate {} more to unlock recommendations",
                RECOMMENDATION_THRESHOLD.saturating_sub(ratings.len())
            )
            .dimmed()
        );
    }
}

/// Full profile panel, shown on request
pub fn print_profile(profile: &ProfileSnapshot, show_analytics: bool) {
    println!("{}", "Your profile:".bold().blue());
    println!("  Movies rated: {}", profile.total_ratings);
    match profile.average_rating {
        Some(avg) => println!("  Average rating: {:.1}", avg),
        None => println!("  Average rating: -"),
    }
    println!("  Five-star ratings: {}", profile.five_star_count());
    if let Some(liked) = profile.liked_percent() {
        println!("  Liked (4+ stars): {}%", liked);
    }

    if !show_analytics {
        return;
    }
    println!("  {}", "Distribution:".bold());
    for (stars, count) in profile.distribution().collect::<Vec<_>>().into_iter().rev() {
        println!("    {} {} {}", stars, "#".repeat(count).yellow(), count);
    }
}

pub fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => println!("{} {}", "✓".green(), notice.message),
        NoticeKind::Error => println!("{} {}", "✗".red(), notice.message.red()),
    }
}
