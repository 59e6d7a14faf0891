use mapgraph_core::{Directionality, GraphState, Point, project};
use mapgraph_skia_render::{
    Backdrop, ImageFormat, SkiaRenderError, SkiaRenderOptions, render_to_bytes, render_to_file,
};

fn annotated_state() -> GraphState {
    let mut state = GraphState::new();
    state.add_node(Point::new(20.0, 20.0));
    state.add_node(Point::new(80.0, 60.0));
    state.add_edge(0, 1);
    state
}

fn small_options() -> SkiaRenderOptions {
    SkiaRenderOptions {
        width: 120,
        height: 90,
        ..SkiaRenderOptions::default()
    }
}

#[test]
fn encodes_png() {
    let bytes = render_to_bytes(&project(&annotated_state()), None, ImageFormat::Png, &small_options())
        .expect("png render failed");
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn encodes_jpeg_or_reports_unsupported() {
    match render_to_bytes(
        &project(&annotated_state()),
        None,
        ImageFormat::Jpeg { quality: 80 },
        &small_options(),
    ) {
        Ok(bytes) => assert!(bytes.starts_with(&[0xFF, 0xD8])),
        Err(SkiaRenderError::EncodeUnsupported(_)) => {}
        Err(err) => panic!("unexpected error: {:?}", err),
    }
}

#[test]
fn renders_arrows_and_labels_without_error() {
    let mut state = annotated_state();
    state.directionality = Directionality::Directed;
    state.show_labels = true;
    let bytes = render_to_bytes(&project(&state), None, ImageFormat::Png, &small_options())
        .expect("render failed");
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn backdrop_sets_canvas_size() {
    let blank = render_to_bytes(&[], None, ImageFormat::Png, &small_options()).expect("render failed");
    let backdrop = Backdrop::decode(&blank).expect("decode failed");
    assert_eq!((backdrop.width(), backdrop.height()), (120, 90));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.png");
    let options = SkiaRenderOptions {
        width: 10,
        height: 10,
        ..SkiaRenderOptions::default()
    };
    render_to_file(&project(&annotated_state()), Some(&backdrop), ImageFormat::Png, &options, &path)
        .expect("render failed");
    let snapshot = Backdrop::open(&path).expect("open failed");
    assert_eq!((snapshot.width(), snapshot.height()), (120, 90));
}

#[test]
fn rejects_undecodable_backdrop() {
    assert!(matches!(
        Backdrop::decode(b"not an image"),
        Err(SkiaRenderError::DecodeFailed(_))
    ));
}

#[test]
fn missing_backdrop_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        Backdrop::open(&dir.path().join("absent.png")),
        Err(SkiaRenderError::Io(_))
    ));
}
