// Minimal smoke run of the core: registry, compose, CSS preview and export

use rgb_split::{
    composition::CssPresenter,
    presets::PRESET_NAMES,
    Bounds, Content, RenderSession, TextStyle,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Testing RGB-Split core functionality");

    // 1. Algorithm registry
    println!("\n1. Algorithm registry...");
    let mut session = RenderSession::default();
    let available = session.compositor().registry().available_algorithms();
    println!("   Available algorithms: {:?}", available);
    assert_eq!(available.len(), 7);

    // 2. Content
    println!("\n2. Text content...");
    let content = Content::from_text("RGB", &TextStyle::default()).ok_or("no content")?;
    let content_box = content.content_box();
    println!("   Content box: {}x{}", content_box.width, content_box.height);

    // 3. Every preset through the CSS presenter
    println!("\n3. Presets...");
    let bounds = Bounds::new(400.0, 300.0);
    for name in PRESET_NAMES {
        session.apply_preset(name)?;
        let scene = session.present(&mut CssPresenter, Some(&content), bounds);
        println!("   {:<7} {} layers", name, scene.layers.len());
        for layer in &scene.layers {
            println!("           {}", layer.style());
        }
    }

    // 4. Export
    println!("\n4. Export...");
    let document = session.export(Some(&content), bounds);
    let svg = document.to_svg();
    println!("   {} groups, {} bytes of SVG", document.groups.len(), svg.len());

    std::fs::write("minimal_test_output.svg", &svg)?;
    println!("   Output saved to: minimal_test_output.svg");

    println!("\nAll checks passed.");
    Ok(())
}
