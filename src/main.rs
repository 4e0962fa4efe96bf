mod app;
mod data;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "data/cleaned_data.csv")]
    data: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "wellbeing avatars",
        options,
        Box::new(move |cc| Ok(Box::new(app::WellbeingApp::new(cc, args.data.clone())))),
    )
}
