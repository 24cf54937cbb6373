use colored::Colorize;
use huegrid_view::{GridBody, GridView, SwatchView};
use std::fmt::Write as _;
use tabled::{settings::Style, Table, Tabled};

const SKELETONS_PER_ROW: usize = 6;

pub fn render_grid(view: &GridView) -> String {
    let mut out = String::new();
    out.push_str(&render_controls(view));
    out.push('\n');

    if let Some(error) = view.error {
        let _ = writeln!(out, "{}", error.red().bold());
    }
    if let Some(label) = &view.count_label {
        let _ = writeln!(out, "{}", label.bold());
    }

    match &view.body {
        GridBody::Skeleton { placeholders } => {
            let tiles: Vec<String> = (0..*placeholders)
                .map(|_| "░░░░░░░░░░".dimmed().to_string())
                .collect();
            for row in tiles.chunks(SKELETONS_PER_ROW) {
                let _ = writeln!(out, "{}", row.join(" "));
            }
        }
        GridBody::Swatches { swatches } => {
            for (index, swatch) in swatches.iter().enumerate() {
                let _ = writeln!(out, "{}", render_swatch(index + 1, swatch));
            }
        }
        GridBody::Empty { message } => {
            let _ = writeln!(out, "{}", message.yellow());
        }
        GridBody::Blank => {}
    }
    out
}

fn render_controls(view: &GridView) -> String {
    let controls = &view.controls;
    let line = format!(
        "{}   {}",
        controls.saturation_label.cyan().bold(),
        controls.lightness_label.cyan().bold()
    );
    if controls.disabled {
        format!("{}   {}", line, "(loading...)".dimmed())
    } else {
        line
    }
}

fn render_swatch(index: usize, swatch: &SwatchView) -> String {
    let bg = swatch.background;
    let fg = swatch.palette.foreground();
    let tile = format!(
        " {:>3}  {:<28} {}  {:<18} ",
        index, swatch.name, swatch.hex, swatch.rgb_label
    )
    .on_truecolor(bg.r, bg.g, bg.b)
    .truecolor(fg.r, fg.g, fg.b);

    match swatch.ack_message() {
        Some(message) => format!("{}  {}", tile, message.green().bold()),
        None => tile.to_string(),
    }
}

#[derive(Tabled)]
struct SwatchRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Hue")]
    hue: u16,
    #[tabled(rename = "Hex")]
    hex: String,
    #[tabled(rename = "RGB")]
    rgb: String,
    #[tabled(rename = "Text")]
    text: String,
}

pub fn render_table(view: &GridView) -> String {
    let mut out = String::new();
    out.push_str(&render_controls(view));
    out.push('\n');
    if let Some(error) = view.error {
        let _ = writeln!(out, "{}", error.red().bold());
    }
    if let Some(label) = &view.count_label {
        let _ = writeln!(out, "{}", label.bold());
    }

    match &view.body {
        GridBody::Swatches { swatches } => {
            let rows: Vec<SwatchRow> = swatches
                .iter()
                .enumerate()
                .map(|(index, swatch)| SwatchRow {
                    index: index + 1,
                    name: swatch.name.clone(),
                    hue: swatch.hue,
                    hex: swatch.hex.to_string(),
                    rgb: swatch.rgb_label.clone(),
                    text: format!("{:?}", swatch.palette).to_lowercase(),
                })
                .collect();
            let _ = writeln!(out, "{}", Table::new(rows).with(Style::rounded()));
        }
        GridBody::Empty { message } => {
            let _ = writeln!(out, "{}", message.yellow());
        }
        GridBody::Skeleton { placeholders } => {
            let _ = writeln!(out, "{}", format!("Loading {} placeholders...", placeholders).dimmed());
        }
        GridBody::Blank => {}
    }
    out
}
