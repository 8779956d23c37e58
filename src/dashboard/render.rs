//! HTML fragments for the dashboard screens.
//!
//! Rendering only reads the snapshot it is given.

use super::store::Store;
use crate::models::{Photo, Rover};

/// Escape text for use inside element content or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Static asset path of a rover's card image.
pub fn rover_image(rover: &Rover) -> String {
    format!("images/{}.jpg", rover.name)
}

pub fn rover_status(rover: &Rover) -> String {
    format!("The mission is {}", rover.status)
}

/// One card of the rover grid, keyed by the rover id.
pub fn rover_card(rover: &Rover) -> String {
    format!(
        r#"<div class="card-container" id="{id}">
    <img src="{image}" class="card-image">
    <div class="card-body-container">
        <h3>{name}</h3>
        <p>{status}</p>
    </div>
</div>"#,
        id = rover.id,
        image = html_escape(&rover_image(rover)),
        name = html_escape(&rover.name),
        status = html_escape(&rover_status(rover)),
    )
}

/// Rover grid screen.
pub fn rovers_view(store: &Store) -> String {
    let cards: Vec<String> = store.rovers.iter().map(rover_card).collect();
    format!(
        "<div class=\"rovers-section-layout\">\n{}\n</div>",
        cards.join("\n")
    )
}

fn line(title: &str, value: &str) -> String {
    format!(
        r#"<p><b class="rover-line-title">{}: </b>{}</p>"#,
        title,
        html_escape(value)
    )
}

fn photo_img(photo: &Photo) -> String {
    format!(
        r#"<img src="{}" class="rover-photo">"#,
        html_escape(&photo.img_src)
    )
}

/// Photo gallery of a rover, one `<img>` per loaded photo.
pub fn rover_gallery(rover: &Rover) -> String {
    rover.photos.iter().map(photo_img).collect()
}

/// Rover detail screen.
pub fn rover_view(rover: &Rover) -> String {
    format!(
        r#"<div class="rover-container">
    <div class="rover-line-container">
        {name}
        {status}
    </div>
    <div class="rover-line-container">
        {launch}
        {landing}
    </div>
    <div class="rover-line-container">
        {total}
    </div>
    <div class="rover-line-container">
        {gallery}
    </div>
</div>"#,
        name = line("Name", &rover.name),
        status = line("Status", &rover.status),
        launch = line("Launching", &rover.launch_date),
        landing = line("Landing", &rover.landing_date),
        total = line("Total Photos", &rover.total_photos.to_string()),
        gallery = rover_gallery(rover),
    )
}

/// Network error screen. There is no way back short of a reload.
pub fn error_view() -> String {
    r#"<div class="rover-container">
    <div class="rover-line-container">
        <p><b class="rover-line-title">Network Error: </b>Please reload the page and try again</p>
    </div>
</div>"#
        .to_string()
}
