// mypy Language Server Protocol implementation
//
// Publishes mypy diagnostics for Python files:
// - on open and save
// - while typing, when lintOnChange is on
// - with unsaved content checked through shadow files

mod convert;
mod document;
mod events;
mod logging;
mod roots;
mod server;

use tower_lsp::{LspService, Server};

#[tokio::main]
async fn main() {
    let log = logging::init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(move |client| server::MypyLanguageServer::new(client, log));
    Server::new(stdin, stdout, socket).serve(service).await;
}
