use druid::{AppLauncher, PlatformError, WindowDesc};
use structopt::StructOpt;

use mandelscope::gui::widget::ExplorerWidget;

#[derive(StructOpt)]
#[structopt(name = "mandelscope-viewer")]
struct Opt {
    /// Window width in pixels
    #[structopt(long, default_value = "500")]
    width: usize,
    /// Window height in pixels
    #[structopt(long, default_value = "500")]
    height: usize,
}

fn main() -> Result<(), PlatformError> {
    let opt = Opt::from_args();
    AppLauncher::with_window(
        WindowDesc::new(ExplorerWidget::new(opt.width, opt.height))
            .title("Mandelscope")
            .window_size((opt.width as f64, opt.height as f64)),
    )
    .launch(())?;
    Ok(())
}
