//! The classic gallery demo: three input shapes, one document.
//!
//! The example logs its own source (note the `//@` marker lines below) and
//! registers one gallery per accepted input shape.

use labwiki::{GalleryInput, ImageData, ImageFormat, LoggerOptions, NotebookLogger};

/// Stand-in for a plotting library's image encoder.
fn fake_plot(seed: u8) -> ImageData {
    ImageData::new(vec![seed; 64])
}

fn main() -> Result<(), labwiki::LogError> {
    let out = std::env::temp_dir();
    let options = LoggerOptions::new()
        .with_categories(["example", "demonstration"])
        .with_marker("//@")
        .with_image_dir(&out);
    let mut log = NotebookLogger::from_source(include_str!("gallery.rs"), options)?;

    //@ = Gallery with prespecified filenames =
    let mut named = Vec::new();
    for i in 0..3u8 {
        let name = format!("{i:02}.jpg");
        std::fs::write(out.join(&name), fake_plot(i).bytes)?;
        named.push((name.into(), Some(format!("{i}th image"))));
    }
    log.add_gallery_fmt(GalleryInput::Captioned(named), ImageFormat::Jpg)?;

    //@ = Gallery with unspecified filenames =
    let captioned = (0..3u8)
        .map(|i| (fake_plot(i).into(), Some(format!("{i}th image"))))
        .collect();
    log.add_gallery(GalleryInput::Captioned(captioned))?;

    //@ = Gallery with unspecified filenames and no captions =
    let plain = (0..3u8).map(|i| fake_plot(i).into()).collect();
    log.add_gallery(GalleryInput::Images(plain))?;

    log.save(out.join("gallery_example.mw"))?;
    println!("wrote {}", out.join("gallery_example.mw").display());
    Ok(())
}
