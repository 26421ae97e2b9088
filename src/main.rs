use std::env;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use rte_surface::app::{KeyScope, Target};
use rte_surface::core::instances::InstanceRegistry;
use rte_surface::core::trigger::TriggerRegistry;
use rte_surface::kernel::services::adapters::{
    apply_trigger_rules, get_settings_path, load_target_config, HeadlessToolbar,
};
use rte_surface::kernel::services::ports::{TargetConfig, Toolbar};
use rte_surface::kernel::surface::{SurfaceDeps, SurfaceHost, SurfaceInput};
use rte_surface::models::Selection;

mod logging;

const SAMPLE: &str = "<h1>Surface</h1><p>Headless editing core.</p>";

fn load_config(arg: Option<&String>) -> Result<TargetConfig, Box<dyn std::error::Error>> {
    if let Some(path) = arg {
        return Ok(load_target_config(Path::new(path))?);
    }
    match get_settings_path().filter(|p| p.exists()) {
        Some(path) => Ok(load_target_config(&path)?),
        None => Ok(TargetConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logging = logging::init();
    let args: Vec<String> = env::args().collect();

    let config = load_config(args.get(1))?;
    let html = match args.get(2) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };

    let mut triggers = TriggerRegistry::with_defaults(config.platform.kind);
    apply_trigger_rules(&mut triggers, &config.triggers);
    let mut deps = SurfaceDeps::with_defaults(config.platform);
    deps.triggers = Rc::new(triggers);

    let registry = InstanceRegistry::new();
    let surface_config = config.surface.clone();
    let mut target = Target::new(
        &registry,
        config,
        deps,
        Box::new(|role| Box::new(HeadlessToolbar::new(role, true)) as Box<dyn Toolbar>),
    )?;

    let surface = target.create_surface(SurfaceInput::Html(html), surface_config, SurfaceHost::headless());
    let id = target.add_surface(surface);
    target.set_surface(id)?;

    if let Some(surface) = target.surface_mut() {
        surface.select(Selection::caret(0, 0));
        surface.insert_text("Editable ", "demo");
    }
    let help = target.handle_key_down(
        KeyScope::Document,
        KeyEvent::new(KeyCode::Char('/'), KeyModifiers::CONTROL),
    );
    tracing::info!(help, "document trigger dispatched");
    if let Some(surface) = target.surface_mut() {
        let all = surface.handle_key_down(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        let bold = surface.handle_key_down(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL));
        tracing::info!(all, bold, "demo commands dispatched");
    }
    target.tick(Instant::now());

    if let Some(surface) = target.surface() {
        println!("{}", surface.html());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(target.destroy());
    Ok(())
}
