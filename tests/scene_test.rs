use landscape_scene::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

/// hands out a 4x4 image for every file except the ones listed as broken
struct FakeDecoder {
    broken: HashSet<&'static str>,
}

impl FakeDecoder {
    fn new(broken: &[&'static str]) -> Self {
        Self {
            broken: broken.iter().copied().collect(),
        }
    }
}

impl ImageDecoder for FakeDecoder {
    fn decode_rgba(&self, path: &Path) -> Result<DecodedImage, String> {
        let file = path.file_name().and_then(|name| name.to_str()).unwrap_or("");
        if self.broken.contains(file) {
            return Err(format!("can't fopen {file}"));
        }
        Ok(DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![128; 4 * 4 * 4],
        })
    }
}

fn recording_renderer(decoder: &FakeDecoder) -> (Rc<RecordingBackend>, SceneRenderer) {
    let recording = Rc::new(RecordingBackend::new());
    let backend: Rc<dyn GpuBackend> = recording.clone();
    let renderer = SceneRenderer::new(backend, decoder, &SceneAttributes::new()).unwrap();
    (recording, renderer)
}

#[test]
fn landscape_frame() {
    let (recording, renderer) = recording_renderer(&FakeDecoder::new(&[]));
    let textures: Vec<GLuint> = renderer.sprites().iter().map(Sprite::texture_id).collect();
    assert_eq!(textures.len(), 5);
    assert!(textures.iter().all(|id| *id != NO_TEXTURE));

    recording.take_commands();
    renderer.render();

    assert_eq!(recording.draw_count(), 5);
    assert_eq!(recording.drawn_textures(), textures);

    let commands = recording.commands();
    assert_eq!(commands[0], GpuCommand::Clear(BACKGROUND_COLOR));
    assert_eq!(commands[1], GpuCommand::UseProgram(renderer.shader().id()));
    assert_eq!(
        commands[2],
        GpuCommand::UniformMat4 {
            location: renderer.shader().get_unif(PROJECTION_UNIFORM),
            matrix: *renderer.projection(),
        }
    );
    assert_eq!(recording.bound_texture(), NO_TEXTURE);
}

#[test]
fn landscape_order() {
    let (_, renderer) = recording_renderer(&FakeDecoder::new(&[]));
    let expected: Vec<(Vec2, Vec2)> = LANDSCAPE_SCENE
        .iter()
        .map(|definition| definition.resolve(800, 600))
        .collect();
    let actual: Vec<(Vec2, Vec2)> = renderer
        .sprites()
        .iter()
        .map(|sprite| (sprite.position(), sprite.size()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn broken_textures_are_skipped() {
    let decoder = FakeDecoder::new(&["clouds_1.png", "rocks.png"]);
    let (recording, renderer) = recording_renderer(&decoder);

    let sprites = renderer.sprites();
    assert_eq!(sprites.len(), 5);
    assert!(!sprites[1].has_texture());
    assert!(!sprites[3].has_texture());

    recording.take_commands();
    renderer.render();
    assert_eq!(
        recording.drawn_textures(),
        vec![
            sprites[0].texture_id(),
            sprites[2].texture_id(),
            sprites[4].texture_id()
        ]
    );
}

#[test]
fn custom_clear_color() {
    let recording = Rc::new(RecordingBackend::new());
    let backend: Rc<dyn GpuBackend> = recording.clone();
    let color = glm::vec4(0.5, 0.7, 0.9, 1.0);
    let config = SceneAttributes::new().with_clear_color(color);
    let renderer = SceneRenderer::new(backend, &FakeDecoder::new(&[]), &config).unwrap();

    recording.take_commands();
    renderer.render();
    assert_eq!(recording.commands()[0], GpuCommand::Clear(color));
}

#[test]
fn setup_uploads_sampler_once() {
    let (recording, renderer) = recording_renderer(&FakeDecoder::new(&[]));
    let sampler = GpuCommand::UniformInt {
        location: renderer.shader().get_unif(SAMPLER_UNIFORM),
        value: 0,
    };
    let commands = recording.commands();
    assert_eq!(commands[0], GpuCommand::EnableAlphaBlending);
    assert_eq!(commands.iter().filter(|c| **c == sampler).count(), 1);

    renderer.render();
    renderer.render();
    assert_eq!(
        recording.commands().iter().filter(|c| **c == sampler).count(),
        1
    );
}

#[test]
fn teardown_releases_everything() {
    let (recording, renderer) = recording_renderer(&FakeDecoder::new(&["sky.png"]));
    let program = renderer.shader().id();
    let vao = renderer.mesh().vao();
    renderer.render();
    drop(renderer);

    assert!(recording.live_textures().is_empty());
    let deleted = recording.deleted_textures();
    assert_eq!(deleted.len(), 4);
    assert_eq!(deleted.iter().collect::<HashSet<_>>().len(), 4);

    let commands = recording.commands();
    assert!(commands.contains(&GpuCommand::DeleteProgram(program)));
    assert!(commands
        .iter()
        .any(|c| matches!(c, GpuCommand::DeleteVertexArray { vao: v, .. } if *v == vao)));
}

#[test]
fn shader_failure_is_fatal() {
    let backend: Rc<dyn GpuBackend> = Rc::new(RecordingBackend::failing_shaders("0:1: error"));
    let result = SceneRenderer::new(backend, &FakeDecoder::new(&[]), &SceneAttributes::new());
    let err = EngineError::from(result.unwrap_err());
    assert!(err.to_string().contains("0:1: error"));
}

#[test]
fn missing_asset_dir() {
    // the real decoder on a directory that does not exist, nothing may panic
    let recording = Rc::new(RecordingBackend::new());
    let backend: Rc<dyn GpuBackend> = recording.clone();
    let config = SceneAttributes::new().with_texture_dir("does/not/exist");
    let renderer = SceneRenderer::new(backend, &StbDecoder, &config).unwrap();
    assert!(renderer.sprites().iter().all(|sprite| !sprite.has_texture()));

    recording.take_commands();
    renderer.render();
    assert_eq!(recording.draw_count(), 0);
}

#[test]
fn bundled_assets_decode() {
    let texture_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/textures/landscape");
    for definition in LANDSCAPE_SCENE.iter() {
        let image = StbDecoder
            .decode_rgba(&texture_dir.join(definition.file))
            .unwrap();
        assert_eq!((image.width, image.height), (128, 96));
        assert!(image.is_valid());
    }

    let recording = Rc::new(RecordingBackend::new());
    let backend: Rc<dyn GpuBackend> = recording.clone();
    let config = SceneAttributes::new().with_texture_dir(texture_dir);
    let renderer = SceneRenderer::new(backend, &StbDecoder, &config).unwrap();
    assert!(renderer.sprites().iter().all(Sprite::has_texture));
}

#[test]
fn rgb_and_grey_decode_to_rgba() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

    let rgb = StbDecoder.decode_rgba(&fixtures.join("rgb_3x2.png")).unwrap();
    assert_eq!((rgb.width, rgb.height), (3, 2));
    assert_eq!(rgb.pixels.len(), 3 * 2 * 4);
    assert!(rgb.is_valid());
    assert_eq!(rgb.pixels[..4], [10, 20, 30, 255]);
    assert_eq!(rgb.pixels[20..], [160, 170, 180, 255]);

    let grey = StbDecoder.decode_rgba(&fixtures.join("gray_2x2.png")).unwrap();
    assert_eq!((grey.width, grey.height), (2, 2));
    assert_eq!(grey.pixels.len(), 2 * 2 * 4);
    assert_eq!(grey.pixels[4..8], [64, 64, 64, 255]);
}
