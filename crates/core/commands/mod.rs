use std::net::SocketAddr;

use isbn_lookup::Isbn;

use clap::{AppSettings, Subcommand};
use eyre::WrapErr;
use log::{info, trace};

use crate::{app, server};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Look up a book by ISBN and print a summary
    #[clap(setting(AppSettings::ArgRequiredElseHelp))]
    Lookup {
        /// The ISBN of the book to look up (10 or 13 digits, hyphens are allowed)
        isbn: String,
    },
    /// Serve the ISBN lookup page and API
    Serve {
        /// The address to listen on
        #[clap(short, long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Commands {
    pub fn execute(self) -> eyre::Result<String> {
        match self {
            Commands::Lookup { isbn } => {
                trace!("lookup subcommand called with the value of '{isbn}'");
                let normalized = Isbn::parse(&isbn)?;

                let lookup = isbn_lookup::lookup(&normalized)
                    .wrap_err_with(|| format!("Failed to retrieve book data for ISBN {isbn}"))?;

                app::describe_lookup(&isbn, lookup)
            }
            Commands::Serve { addr } => {
                info!("Starting server..");
                tokio::runtime::Runtime::new()
                    .wrap_err("Failed to start the async runtime")?
                    .block_on(server::serve(addr))?;
                Ok("Server shut down".to_owned())
            }
        }
    }
}
