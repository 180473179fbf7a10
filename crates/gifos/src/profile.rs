//! The profile animation
//!
//! Builds the full boot, login and shell session as a [`Script`]. Images are
//! decoded and sized up front so the script itself never fails to build.

use gifos_anim::SpeedClass;
use image::RgbImage;
use tracing::debug;

use crate::{
    assets::{self, Corner},
    config::ProfileConfig,
    instruction::Script,
    RenderError,
};

const IMAGE_MARGIN: u32 = 30;
const LOGO_WIDTH_FRACTION: f64 = 0.333;
const AVATAR_WIDTH_FRACTION: f64 = 0.25;

const MEMORY_TOTAL: u64 = 0x4000_0000;
const MEMORY_STEP: u64 = 0x4ff_ffff;

const HOME_LISTING: &str = "\
drwxr-xr-x  6 {user} {user} 4.0K Oct 14 06:33 .
drwxr-xr-x  3 root    root    4.0K Oct 11 06:17 ..
-rw-------  1 {user} {user} 2.7K Oct 14 09:03 .bash_history
-rw-r--r--  1 {user} {user}  609 Oct 14 20:19 .bashrc
drwxr-xr-x  4 {user} {user} 4.0K Oct 12 20:49 .cargo
drwx------  5 {user} {user} 4.0K Oct 13 21:49 .config
-rw-r--r--  1 {user} {user}  398 Oct  3 21:43 .gitconfig
drwx------  2 {user} {user} 4.0K Oct  8 20:02 .ssh
-rwx------  1 {user} {user}  239 Oct 11 22:58 stats
drwxr-xr-x  9 {user} {user} 4.0K Oct 14 18:30 src
";

/// Decoded images, already sized for the screen
#[derive(Debug, Clone, Default)]
pub struct ProfileAssets {
    pub logo: Option<RgbImage>,
    pub avatar: Option<RgbImage>,
}

impl ProfileAssets {
    /// Load the configured images and size them for a screen `screen_width` wide
    pub fn load(profile: &ProfileConfig, screen_width: u32) -> Result<Self, RenderError> {
        let fitted = |path: &std::path::Path, fraction: f64| -> Result<RgbImage, RenderError> {
            debug!("Loading {}", path.display());
            let image = assets::load_image(path)?;
            Ok(assets::fit_width(&image, fraction_of(screen_width, fraction)))
        };

        Ok(Self {
            logo: profile
                .logo
                .as_deref()
                .map(|p| fitted(p, LOGO_WIDTH_FRACTION))
                .transpose()?,
            avatar: profile
                .avatar
                .as_deref()
                .map(|p| fitted(p, AVATAR_WIDTH_FRACTION))
                .transpose()?,
        })
    }
}

fn fraction_of(width: u32, fraction: f64) -> u32 {
    (f64::from(width) * fraction) as u32
}

/// Script builder for one profile on a screen of a given pixel size
#[derive(Debug)]
pub struct ProfileScript<'a> {
    profile: &'a ProfileConfig,
    screen: (u32, u32),
    assets: ProfileAssets,
}

impl<'a> ProfileScript<'a> {
    pub fn new(profile: &'a ProfileConfig, screen: (u32, u32), assets: ProfileAssets) -> Self {
        Self {
            profile,
            screen,
            assets,
        }
    }

    /// The complete session: boot, login, then the shell
    pub fn build(&self) -> Script {
        let mut script = Script::new();
        self.boot(&mut script);
        self.login(&mut script);
        self.shell(&mut script);
        script
    }

    pub fn boot(&self, script: &mut Script) {
        if let Some(logo) = &self.assets.logo {
            let rect = assets::place(Corner::TopRight, IMAGE_MARGIN, self.screen, logo);
            script.draw_image(rect, logo.clone());
        }

        script
            .hold(40)
            .set_cursor_visible(false)
            .println("Release gifBIOS v7.3.4 - Build date 20/01/2031")
            .hold(20)
            .println("(C) 2022 GIF Systems Inc.\n\n\n")
            .hold(20)
            .println("GH Profile 0 Rev 1000")
            .hold(20)
            .cursor_to_last_row()
            .print("Press DEL to enter setup, ESC to skip memory test")
            .cursor_to_row(7)
            .hold(20)
            .println("Main Processor: GifCPU - 100Hz")
            .hold(20);

        for checked in (0..MEMORY_TOTAL).step_by(MEMORY_STEP as usize) {
            script
                .clear_line()
                .cursor_to_home()
                .print(format!("Memory Check: {checked}"))
                .hold(1);
        }

        script
            .clear_line()
            .cursor_to_home()
            .println("Memory Check: 1048576K + 1024K Shared Memory\n")
            .hold(20)
            .println("WAIT...")
            .hold(100)
            .clear_screen()
            .hold(100)
            .print(format!("Starting {}...", self.profile.os_name))
            .hold(150)
            .clear_screen();
    }

    pub fn login(&self, script: &mut Script) {
        let profile = self.profile;

        script
            .clear_screen()
            .println(format!("{} {} tty1", profile.os_name, profile.os_version))
            .println("")
            .print("login: ")
            .set_cursor_visible(true)
            .hold(150)
            .type_text(format!("{}\n", profile.username), SpeedClass::Fast)
            .print("password: ")
            .set_cursor_visible(true)
            .hold(200)
            .println("")
            .println("")
            .println(format!("Last login {} on tty1", profile.last_login))
            .print(format!(
                "Welcome to {} {}\n\n  * Documentation: {}\n\n\
                 0 packages can be updated.\n0 updates are security updates.\n",
                profile.os_name, profile.os_version, profile.documentation_url
            ))
            .hold(50);
    }

    /// Shell prompt, a directory listing and the stats lookup
    pub fn shell(&self, script: &mut Script) {
        let profile = self.profile;

        self.prompt(script);
        script
            .hold(75)
            .type_text("ls -la\n", SpeedClass::Fast)
            .print(HOME_LISTING.replace("{user}", &format!("{:<7}", profile.username)));
        self.prompt(script);

        script
            .hold(75)
            .type_text(format!("./stats -u {}\n", profile.username), SpeedClass::Fast)
            .set_cursor_visible(false)
            .print("\nConnecting...")
            .type_text("............", SpeedClass::Rapid)
            .print("\nSending query...")
            .type_text("............................\n", SpeedClass::Rapid)
            .println("")
            .println("")
            .println(" -- User Details");
        highlighted_field(script, "   User ID:         ", &profile.user_id.to_string());
        highlighted_field(script, "   Username:        ", &profile.username);
        highlighted_field(script, "   Real name:       ", &profile.real_name);
        highlighted_field(script, "   Location:        ", &profile.location);
        script.println("").println("").println(" -- Statistics");
        highlighted_field(
            script,
            "   Total Stars:     ",
            &profile.stats.total_stars.to_string(),
        );
        highlighted_field(
            script,
            "   Total Followers: ",
            &profile.stats.total_followers.to_string(),
        );
        script.println("").println("").println("");

        if let Some(avatar) = &self.assets.avatar {
            let rect = assets::place(Corner::BottomRight, IMAGE_MARGIN, self.screen, avatar);
            script.draw_image(rect, avatar.clone());
        }
        script.hold(500);
    }

    fn prompt(&self, script: &mut Script) {
        script
            .print(format!(
                "\n{}@{}:~$ ",
                self.profile.username, self.profile.hostname
            ))
            .set_cursor_visible(true)
            .hold(75);
    }
}

fn highlighted_field(script: &mut Script, label: &str, value: &str) {
    script
        .print(label)
        .set_highlight(true)
        .println(value)
        .set_highlight(false);
}
