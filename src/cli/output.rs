//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Credentials;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a one-column table of service names.
pub fn print_services_table<'a>(services: impl IntoIterator<Item = &'a str>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service"]);

    let mut rows = 0;
    for name in services {
        table.add_row(vec![name]);
        rows += 1;
    }

    if rows == 0 {
        info("No services in this vault yet.");
        tip("Run `passvault add <SERVICE>` to add your first one.");
        return;
    }

    println!("{table}");
}

/// Print decrypted credentials as a two-row table.
pub fn print_credentials(creds: &Credentials) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Account", creds.account.as_str()]);
    table.add_row(vec!["Password", creds.password.as_str()]);
    println!("{table}");
}
