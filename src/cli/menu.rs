//! Main menu options.

use std::fmt;
use std::str::FromStr;

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    /// Print profile information.
    ProfileInfo,
    /// Store post links in a file.
    ExportLinks,
    /// Download images from a profile.
    DownloadPosts,
    /// Download the most liked post.
    DownloadMostLiked,
    /// Store links to posts where the user is tagged.
    ExportTagged,
    /// Choose a different profile.
    SwitchProfile,
    /// Leave the program.
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 7] = [
        MenuOption::ProfileInfo,
        MenuOption::ExportLinks,
        MenuOption::DownloadPosts,
        MenuOption::DownloadMostLiked,
        MenuOption::ExportTagged,
        MenuOption::SwitchProfile,
        MenuOption::Exit,
    ];

    /// Number typed to select this option.
    pub fn code(&self) -> i32 {
        match self {
            MenuOption::ProfileInfo => 1,
            MenuOption::ExportLinks => 2,
            MenuOption::DownloadPosts => 3,
            MenuOption::DownloadMostLiked => 4,
            MenuOption::ExportTagged => 5,
            MenuOption::SwitchProfile => 6,
            MenuOption::Exit => -1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::ProfileInfo => "Print profile information",
            MenuOption::ExportLinks => "Store post links in a file",
            MenuOption::DownloadPosts => "Download images from a profile",
            MenuOption::DownloadMostLiked => "Download most liked post",
            MenuOption::ExportTagged => "Store links to post where user is tagged",
            MenuOption::SwitchProfile => "Choose different profile",
            MenuOption::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code();
        if code < 0 {
            write!(f, "{} - {}", code, self.label())
        } else {
            write!(f, "#{} - {}", code, self.label())
        }
    }
}

impl FromStr for MenuOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code: i32 = s
            .trim()
            .parse()
            .map_err(|_| format!("Not a menu number: {}", s.trim()))?;
        MenuOption::ALL
            .into_iter()
            .find(|option| option.code() == code)
            .ok_or_else(|| format!("Unknown menu option: {}", code))
    }
}

/// Render the menu the way it is shown before each prompt.
pub fn render_menu() -> String {
    let mut out = String::from("\t\t\tChoose number in front of an option: \n");
    for option in MenuOption::ALL {
        out.push_str(&format!("\t\t\t\t{}\n", option));
    }
    out
}
