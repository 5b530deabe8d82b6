#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use magagro_wasm::catalog::{grid_markup, PRODUCTS};
use magagro_wasm::noise::hash;
use magagro_wasm::shaders::{DISSOLVE_FRAGMENT, FULLSCREEN_VERTEX};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn hash_is_stable_in_the_browser() {
    let p = [3.0, -7.5];
    assert_eq!(hash(p).to_bits(), hash(p).to_bits());
    assert!((0.0..1.0).contains(&hash(p)));
}

#[wasm_bindgen_test]
fn catalog_grid_renders_one_button_per_product() {
    let doc = document();
    let grid = doc.create_element("div").unwrap();
    grid.set_inner_html(&grid_markup(PRODUCTS));
    let buttons = grid.query_selector_all("[data-open]").unwrap();
    assert_eq!(buttons.length() as usize, PRODUCTS.len());

    let first = grid.query_selector("[data-open]").unwrap().unwrap();
    assert_eq!(first.get_attribute("data-open").as_deref(), Some(PRODUCTS[0].id));
}

#[wasm_bindgen_test]
fn dissolve_program_compiles_and_links() {
    let doc = document();
    let canvas = doc
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    let Some(ctx) = canvas.get_context("webgl2").unwrap() else {
        // Headless browsers without GPU support have nothing to test here.
        return;
    };
    let gl = ctx.dyn_into::<web_sys::WebGl2RenderingContext>().unwrap();

    let compile = |kind, src: &str| {
        let s = gl.create_shader(kind).unwrap();
        gl.shader_source(&s, src);
        gl.compile_shader(&s);
        let ok = gl
            .get_shader_parameter(&s, web_sys::WebGl2RenderingContext::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        assert!(ok, "{:?}", gl.get_shader_info_log(&s));
        s
    };
    let vs = compile(web_sys::WebGl2RenderingContext::VERTEX_SHADER, FULLSCREEN_VERTEX);
    let fs = compile(web_sys::WebGl2RenderingContext::FRAGMENT_SHADER, DISSOLVE_FRAGMENT);

    let program = gl.create_program().unwrap();
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    assert!(gl
        .get_program_parameter(&program, web_sys::WebGl2RenderingContext::LINK_STATUS)
        .as_bool()
        .unwrap_or(false));
    assert!(gl.get_uniform_location(&program, "uProgress").is_some());
}
