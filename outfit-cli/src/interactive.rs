use anyhow::Context;
use inquire::{Select, Text};
use outfit_core::{Action, Dashboard, Gender, Style, UserSettings};

use crate::render;

const SEARCH: &str = "Search for a city";
const NEXT: &str = "Change outfit suggestion";
const SETTINGS: &str = "Personalized settings";
const QUIT: &str = "Quit";

/// Menu loop over a running dashboard. Each choice becomes one action.
pub async fn run(dashboard: &mut Dashboard) -> anyhow::Result<()> {
    loop {
        if dashboard.pending() > 0 {
            eprintln!("Loading...");
        }
        dashboard.settle().await;
        for notice in dashboard.take_notices() {
            eprintln!("{}", render::notice(&notice));
        }
        println!("{}", render::dashboard(dashboard.state()));

        let choice = Select::new("What next?", vec![SEARCH, NEXT, SETTINGS, QUIT])
            .prompt()
            .context("Failed to read menu choice")?;

        match choice {
            SEARCH => {
                let city = Text::new("City:").prompt().context("Failed to read city")?;
                dashboard.dispatch(Action::CitySearched(city));
            }
            NEXT => dashboard.dispatch(Action::ImageCycled),
            SETTINGS => {
                let settings = prompt_settings(dashboard.state().settings())?;
                dashboard.dispatch(Action::SettingsSaved(settings));
            }
            _ => return Ok(()),
        }
    }
}

fn prompt_settings(current: UserSettings) -> anyhow::Result<UserSettings> {
    let genders = Gender::all().to_vec();
    let gender_cursor = genders.iter().position(|g| *g == current.gender).unwrap_or(0);
    let gender = Select::new("Gender:", genders)
        .with_starting_cursor(gender_cursor)
        .prompt()
        .context("Failed to read gender")?;

    let styles = Style::all().to_vec();
    let style_cursor = styles.iter().position(|s| *s == current.style).unwrap_or(0);
    let style = Select::new("Style:", styles)
        .with_starting_cursor(style_cursor)
        .prompt()
        .context("Failed to read style")?;

    Ok(UserSettings { gender, style })
}
