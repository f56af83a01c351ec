use anyhow::anyhow;
use tracing::info;

use walkbot::ui::{WalkbotApp, TITLE};
use walkbot::utils::logging::{init_logging, log_system_info};
use walkbot::{input_channel, load_or_default};

fn main() -> anyhow::Result<()> {
    init_logging();
    log_system_info();

    let settings = load_or_default();
    let (source, subscription) = input_channel();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        vsync: settings.scene.vsync,
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |cc| {
            let app = WalkbotApp::new(cc, settings, source, subscription)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("eframe exited with an error: {e}"))?;

    info!("Shut down cleanly");
    Ok(())
}
