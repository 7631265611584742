//! Real-time chat server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use irori::{
    common::logger::setup_logger,
    infrastructure::{
        ConnectionRegistry, InMemoryAuthService, InMemoryMessageStore, RoomRouter,
    },
    ui::Server,
    usecase::{
        ConnectUseCase, DisconnectUseCase, PresenceBroadcastUseCase, RoomHistoryUseCase,
        SendMessageUseCase, TypingUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Real-time chat server with presence and private messaging", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Capabilities (auth, message store)
    // 2. Shared state (registry, router)
    // 3. UseCases
    // 4. Server

    // 1. Capabilities
    let auth = Arc::new(InMemoryAuthService::new());
    let store = Arc::new(InMemoryMessageStore::new());

    // 2. Shared connection state
    let registry = Arc::new(ConnectionRegistry::new());
    let router = Arc::new(RoomRouter::new(registry.clone()));

    // 3. UseCases
    let presence_usecase = Arc::new(PresenceBroadcastUseCase::new(
        registry.clone(),
        router.clone(),
    ));
    let connect_usecase = Arc::new(ConnectUseCase::new(
        auth.clone(),
        registry.clone(),
        router.clone(),
        presence_usecase.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        registry.clone(),
        router.clone(),
        presence_usecase.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        router.clone(),
        store.clone(),
    ));
    let typing_usecase = Arc::new(TypingUseCase::new(registry.clone(), router.clone()));
    let history_usecase = Arc::new(RoomHistoryUseCase::new(store.clone()));

    // 4. Create and run the server
    let server = Server::new(
        auth,
        connect_usecase,
        disconnect_usecase,
        send_message_usecase,
        typing_usecase,
        history_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
