//! Course library commands

use super::{fail, open_business, CommandResult};
use crate::args::CoursesSubcommand;
use relevate::config::Config;
use relevate::models::Course;

/// Dispatch courses subcommands
pub fn run(subcommand: CoursesSubcommand, config: &Config, verbose: bool) -> CommandResult {
    let mut business = open_business(config)?;

    match subcommand {
        CoursesSubcommand::List { category, search } => {
            let query = search.unwrap_or_default();
            let courses: Vec<&Course> = business
                .catalog()
                .search(&query)
                .filter(|c| category.is_none_or(|cat| c.category == cat))
                .collect();

            if courses.is_empty() {
                println!("No courses match.");
                return Ok(());
            }
            for course in courses {
                let star = if business.is_favorite(&course.id) { "★" } else { " " };
                println!(
                    "{star} {:<18} {:<45} {:<22} {:>3} min",
                    course.id,
                    course.title,
                    course.category.label(),
                    course.estimated_minutes
                );
            }
        }
        CoursesSubcommand::Show { course_id, pages } => {
            let course = business
                .catalog()
                .get(&course_id)
                .ok_or_else(|| format!("✗ Course not found: '{course_id}'"))?;
            print_course(course, pages || verbose);
            let completions = business.get_course_completions(&course.id);
            if !completions.is_empty() {
                let passed = completions.iter().filter(|c| c.passed).count();
                println!("\nCompletions: {} ({passed} passed)", completions.len());
            }
        }
        CoursesSubcommand::Favorite { course_id } => {
            let now_favorite = business.toggle_favorite(&course_id).map_err(fail)?;
            if now_favorite {
                println!("✓ Added {course_id} to favorites");
            } else {
                println!("✓ Removed {course_id} from favorites");
            }
        }
        CoursesSubcommand::Favorites => {
            let favorites = business.favorite_courses();
            if favorites.is_empty() {
                println!("No favorite courses yet.");
            }
            for course in favorites {
                println!("★ {:<18} {}", course.id, course.title);
            }
        }
    }
    Ok(())
}

fn print_course(course: &Course, with_pages: bool) {
    println!("\n=== {} ===\n", course.title);
    println!("Id:        {}", course.id);
    println!("Category:  {}", course.category);
    println!("Duration:  {} min", course.estimated_minutes);
    println!("Pages:     {}", course.page_count());
    println!("Questions: {}", course.question_count());
    println!("\n{}", course.description);

    if !course.learning_points.is_empty() {
        println!("\nYou will learn:");
        for point in &course.learning_points {
            println!("  • {point}");
        }
    }

    if with_pages {
        for (i, page) in course.pages.iter().enumerate() {
            println!("\n--- Page {}/{}: {} ---\n", i + 1, course.page_count(), page.title);
            println!("{}", page.content);
        }
    }
}
