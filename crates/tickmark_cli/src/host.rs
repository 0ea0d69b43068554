//! Icon host that renders into a directory

use image::ImageFormat;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tickmark_app::{HostError, IconHost, MenuEntry};
use tickmark_render::RgbaImage;

pub const ICON_FILE: &str = "icon.png";
pub const TITLE_FILE: &str = "title.txt";
pub const MENU_FILE: &str = "menu.txt";

/// Writes `icon.png`, `title.txt` and `menu.txt` into a directory.
///
/// The icon is written to a temp file and renamed so watchers never see a
/// half-written PNG.
#[derive(Debug)]
pub struct FileHost {
    dir: PathBuf,
}

impl FileHost {
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, HostError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        // Entries are appended as they are registered.
        fs::write(dir.join(MENU_FILE), "")?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl IconHost for FileHost {
    fn set_icon(&self, icon: &RgbaImage) -> Result<(), HostError> {
        let tmp = self.dir.join("icon.png.tmp");
        icon.save_with_format(&tmp, ImageFormat::Png)?;
        fs::rename(&tmp, self.dir.join(ICON_FILE))?;
        Ok(())
    }

    fn set_title(&self, title: &str) -> Result<(), HostError> {
        fs::write(self.dir.join(TITLE_FILE), format!("{title}\n"))?;
        Ok(())
    }

    fn add_menu_entry(&self, entry: &MenuEntry) -> Result<(), HostError> {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.dir.join(MENU_FILE))?;
        writeln!(file, "{}\t{}", entry.id, entry.title)?;
        tracing::info!("menu entry {:?} available as `menu {}`", entry.title, entry.id);
        Ok(())
    }
}
