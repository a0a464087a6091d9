use outfit_core::{DailyForecast, DashboardState, ImageCatalogEntry, Notice, NoticeLevel, Phase};

pub fn notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Info => "note",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}: {}", notice.title, notice.message)
}

pub fn catalog_entry(entry: &ImageCatalogEntry) -> String {
    format!("{:<10} {}  ({})\n           {}", entry.id, entry.description, entry.image_hint, entry.image_url)
}

fn temps(day: &DailyForecast) -> String {
    format!("{}° / {}°C", day.min_temp_c, day.max_temp_c)
}

/// Plain-text rendering of the whole dashboard.
pub fn dashboard(state: &DashboardState) -> String {
    let mut lines = Vec::new();

    let location = match state.snapshot() {
        Some(s) => format!("{}, {}", s.city, s.country),
        None if state.weather_phase() == Phase::Loading => "Locating...".to_string(),
        None => "No city selected".to_string(),
    };
    let settings = state.settings();
    lines.push(format!("{location}  |  {} / {}", settings.gender, settings.style));
    lines.push(String::new());

    lines.push("Today's Suggestion".to_string());
    match state.today() {
        Some(today) => {
            lines.push(format!("  {}", today.date.format("%A, %B %-d")));
            lines.push(format!("  {}°C  {}  ({})", today.avg_temp_c, today.weather, temps(today)));
        }
        None => lines.push("  Weather is not available yet.".to_string()),
    }

    if let Some(keywords) = state.keywords() {
        lines.push(format!("  Search: {}", keywords.keywords));
    }

    if state.is_busy() {
        lines.push("  Outfit: loading...".to_string());
    } else if let Some(image) = state.current_image() {
        lines.push(format!(
            "  Outfit {}/{}: {}",
            state.image_index() + 1,
            state.matched().len(),
            image.description
        ));
        lines.push(format!("          {}", image.image_url));
    }

    lines.push(String::new());
    lines.push("This Week".to_string());
    let week = state.week_ahead();
    if week.is_empty() {
        lines.push("  Weather forecast for the week is not available.".to_string());
    }
    for (day, tile) in week {
        let mut row = format!(
            "  {} {:<6}  {:<7} {:>14}",
            day.date.format("%a"),
            day.date.format("%b %-d").to_string(),
            day.weather.as_str(),
            temps(day)
        );
        if let Some(tile) = tile {
            row.push_str("  ");
            row.push_str(&tile.image_hint);
        }
        lines.push(row);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
