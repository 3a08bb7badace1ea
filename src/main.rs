use env_logger::Env;
use landscape_scene::engine_builder::SceneAttributes;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let env = Env::default()
        .filter_or("LOG_LVL", "info")
        .write_style_or("LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    let mut engine = SceneAttributes::new().build_engine()?;
    engine.run()
}
