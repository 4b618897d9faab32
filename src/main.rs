//! # ziplifica CLI
//!
//! ## Usage
//! ```bash
//! ziplifica organize ~/Downloads --mode year-month --date-mode prefix-iso-underscore
//! ziplifica blueprint ./my-site --dry-run
//! ziplifica rules add psd DESIGN
//! ```

mod cli;

use ziplifica::Result;

fn main() -> Result<()> {
    cli::run()
}
