//! Screenshot-based PDF export
//!
//! The HTML is staged to an offscreen render file, rasterized by a headless
//! browser at a fixed 800 px logical width and 2x pixel density,
//! JPEG-encoded, and placed on a single portrait A4 page scaled uniformly
//! to fit. The rasterizer is a trait so the pipeline can be exercised
//! without a browser.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;
use thiserror::Error;

use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use printpdf::{image_crate, Image, ImageTransform, Mm, PdfDocument};

/// Fixed output filename; exports overwrite the previous one
pub const EXPORT_FILE_NAME: &str = "html-export.pdf";

/// Logical render width; fixed so capture geometry does not depend on the
/// terminal or screen the tool happens to run on
pub const RENDER_WIDTH_PX: u32 = 800;

/// Pixel density of the capture
pub const RASTER_SCALE: f64 = 2.0;

/// JPEG quality of the intermediate raster
pub const JPEG_QUALITY: u32 = 85;

/// Best-effort wait for images and fonts inside the page to load before
/// capture; not a completion guarantee
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(800);

/// Portrait A4 in millimeters
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// The capture is interpreted at this density when placed on the page
const RASTER_DPI: f64 = 96.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not stage the render file: {0}")]
    Stage(#[source] std::io::Error),
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("could not decode the captured image: {0}")]
    Decode(String),
    #[error("could not assemble the PDF: {0}")]
    Assemble(String),
    #[error("could not write the PDF: {0}")]
    Write(#[source] std::io::Error),
}

/// A finished capture, JPEG-encoded
pub struct RasterImage {
    pub jpeg: Vec<u8>,
}

/// Screenshot backend. Receives the staged HTML file and the settling delay
/// and returns the rendered page as a JPEG.
pub trait Rasterizer {
    fn rasterize(&self, page_file: &Path, settle: Duration) -> Result<RasterImage, ExportError>;
}

/// Production backend: headless Chrome over CDP
pub struct ChromeRasterizer;

impl Rasterizer for ChromeRasterizer {
    fn rasterize(&self, page_file: &Path, settle: Duration) -> Result<RasterImage, ExportError> {
        let raster = |msg: String| ExportError::Raster(msg);

        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((RENDER_WIDTH_PX, 1100)))
            .build()
            .map_err(|e| raster(format!("failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| raster(format!("failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| raster(format!("failed to create tab: {}", e)))?;

        let url = format!("file://{}", page_file.display());
        tab.navigate_to(&url)
            .map_err(|e| raster(format!("navigation failed: {}", e)))?;
        tab.wait_until_navigated()
            .map_err(|e| raster(format!("wait for navigation failed: {}", e)))?;

        // Give images and fonts a chance to arrive; proceed regardless
        thread::sleep(settle);

        // Capture the full document height, not just the viewport
        let height = tab
            .evaluate("document.documentElement.scrollHeight", false)
            .ok()
            .and_then(|obj| obj.value)
            .and_then(|v| v.as_f64())
            .unwrap_or(1100.0)
            .max(1.0);

        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: RENDER_WIDTH_PX as f64,
            height,
            scale: RASTER_SCALE,
        };

        let jpeg = tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Jpeg,
                Some(JPEG_QUALITY),
                Some(clip),
                true,
            )
            .map_err(|e| raster(format!("screenshot failed: {}", e)))?;

        Ok(RasterImage { jpeg })
    }
}

static STAGE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The offscreen render file. The exporter's equivalent of an offscreen
/// container: never shown to the user, filled for the duration of one
/// capture, and always removed afterwards (Drop), success or failure.
pub struct RenderStage {
    path: PathBuf,
}

impl RenderStage {
    pub fn create(html: &str) -> Result<Self, ExportError> {
        let n = STAGE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "html2pdf-tui-render-{}-{}.html",
            std::process::id(),
            n
        ));
        fs::write(&path, html).map_err(ExportError::Stage)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RenderStage {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Uniform scale that fits an image inside a page while preserving aspect
/// ratio: `min(pageW/imgW, pageH/imgH)`
pub fn fit_scale(page_w: f64, page_h: f64, img_w: f64, img_h: f64) -> f64 {
    (page_w / img_w).min(page_h / img_h)
}

/// Place the JPEG capture on a single portrait A4 page at the page origin
/// and write the document to `out_path`.
pub fn compose_pdf(jpeg: &[u8], out_path: &Path) -> Result<(), ExportError> {
    let dyn_image = image_crate::load_from_memory(jpeg)
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    // Natural size of the capture on paper at the working density
    let img_w_mm = dyn_image.width() as f64 * 25.4 / RASTER_DPI;
    let img_h_mm = dyn_image.height() as f64 * 25.4 / RASTER_DPI;
    let scale = fit_scale(PAGE_WIDTH_MM, PAGE_HEIGHT_MM, img_w_mm, img_h_mm);

    let (doc, page, layer) = PdfDocument::new(
        "html-export",
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "content",
    );

    let image = Image::from_dynamic_image(&dyn_image);
    // PDF origin is bottom-left; the capture goes at the top-left corner
    let translate_y = PAGE_HEIGHT_MM - img_h_mm * scale;
    image.add_to_layer(
        doc.get_page(page).get_layer(layer),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(translate_y as f32)),
            scale_x: Some(scale as f32),
            scale_y: Some(scale as f32),
            dpi: Some(RASTER_DPI as f32),
            ..Default::default()
        },
    );

    let file = fs::File::create(out_path).map_err(ExportError::Write)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Assemble(e.to_string()))?;

    Ok(())
}

/// What a finished export reports back to the UI
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
}

/// Run the whole export pipeline: stage, rasterize, compose, write.
/// The render stage is cleaned up on every path out of this function.
pub fn export_pdf(
    rasterizer: &dyn Rasterizer,
    html: &str,
    out_dir: &Path,
    settle: Duration,
) -> Result<ExportReport, ExportError> {
    let stage = RenderStage::create(html)?;
    let image = rasterizer.rasterize(stage.path(), settle)?;
    let out_path = out_dir.join(EXPORT_FILE_NAME);
    compose_pdf(&image.jpeg, &out_path)?;
    Ok(ExportReport { path: out_path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Stub backend that records the staged file and returns a tiny JPEG
    struct StubRasterizer {
        fail: bool,
        seen: Mutex<Option<PathBuf>>,
    }

    impl StubRasterizer {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: Mutex::new(None),
            }
        }

        fn seen_path(&self) -> PathBuf {
            self.seen.lock().unwrap().clone().expect("capture ran")
        }
    }

    impl Rasterizer for StubRasterizer {
        fn rasterize(&self, page_file: &Path, _settle: Duration) -> Result<RasterImage, ExportError> {
            assert!(page_file.exists(), "render stage must exist during capture");
            *self.seen.lock().unwrap() = Some(page_file.to_path_buf());
            if self.fail {
                return Err(ExportError::Raster("stub failure".to_string()));
            }
            Ok(RasterImage { jpeg: tiny_jpeg() })
        }
    }

    fn tiny_jpeg() -> Vec<u8> {
        let img = image_crate::DynamicImage::new_rgb8(16, 32);
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, image_crate::ImageFormat::Jpeg)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn fit_scale_is_min_of_axis_ratios() {
        assert_eq!(fit_scale(210.0, 297.0, 420.0, 297.0), 0.5);
        assert_eq!(fit_scale(210.0, 297.0, 105.0, 594.0), 0.5);
        assert_eq!(fit_scale(100.0, 100.0, 50.0, 25.0), 2.0);
    }

    #[test]
    fn fitted_image_never_exceeds_page_bounds() {
        let cases = [
            (1600.0, 4000.0),
            (1600.0, 10.0),
            (10.0, 10.0),
            (3000.0, 3000.0),
        ];
        for (w, h) in cases {
            let s = fit_scale(PAGE_WIDTH_MM, PAGE_HEIGHT_MM, w, h);
            assert!(w * s <= PAGE_WIDTH_MM + 1e-9);
            assert!(h * s <= PAGE_HEIGHT_MM + 1e-9);
        }
    }

    #[test]
    fn render_stage_holds_source_and_cleans_up() {
        let html = "<p>stage me</p>";
        let path;
        {
            let stage = RenderStage::create(html).unwrap();
            path = stage.path().to_path_buf();
            assert_eq!(fs::read_to_string(&path).unwrap(), html);
        }
        assert!(!path.exists(), "stage must be removed on drop");
    }

    #[test]
    fn export_writes_pdf_and_removes_stage() {
        let out_dir = std::env::temp_dir();
        let stub = StubRasterizer::new(false);
        let report = export_pdf(&stub, "<h1>ok</h1>", &out_dir, Duration::from_millis(0)).unwrap();

        assert_eq!(report.path, out_dir.join(EXPORT_FILE_NAME));
        let bytes = fs::read(&report.path).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output must be a PDF document");
        assert!(!stub.seen_path().exists(), "render file must be gone after success");
        let _ = fs::remove_file(&report.path);
    }

    #[test]
    fn failed_capture_still_cleans_the_stage() {
        let stub = StubRasterizer::new(true);
        let err = export_pdf(
            &stub,
            "<h1>nope</h1>",
            &std::env::temp_dir(),
            Duration::from_millis(0),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Raster(_)));
        assert!(!stub.seen_path().exists(), "render file must be gone after failure");
    }
}
