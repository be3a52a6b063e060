/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! fixpoll client binary.
//!
//! Reads `FIX_*` configuration, logs the session on through the in-process
//! initiator and polls until Ctrl-C.

use anyhow::Context;
use fixpoll::{
    ClientApplication, ClientConfig, ConsoleLogger, RequestBuilder, RequestDispatcher,
    init_logging,
};
use fixpoll_engine::InitiatorBuilder;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

type App = ClientApplication<ConsoleLogger>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return Err(err.into());
        }
    };
    info!(
        session = %config.session.session_id(),
        poll_interval = ?config.poll_interval,
        "fixpoll starting"
    );

    let app = Arc::new(App::new(config.credentials.clone(), ConsoleLogger));
    let initiator = Arc::new(
        InitiatorBuilder::<App>::new()
            .with_application(Arc::clone(&app))
            .with_session(config.session.clone())
            .build()
            .context("building initiator")?,
    );
    initiator.start().await.context("starting session")?;

    let cancel = CancellationToken::new();
    let dispatcher = RequestDispatcher::new(
        Arc::clone(&initiator),
        app.shared(),
        RequestBuilder::new(config.order),
        ConsoleLogger,
    )
    .with_interval(config.poll_interval);
    let dispatch = tokio::spawn(dispatcher.run(cancel.clone()));

    tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C")?;
    info!("shutdown requested");
    cancel.cancel();

    let dispatcher = dispatch.await.context("dispatcher task")?;
    info!(
        ticks = dispatcher.ticks(),
        last_seq = dispatcher.ids().order_seq(),
        "dispatcher finished"
    );
    initiator.stop().await.context("stopping session")?;

    let state = app.shared().snapshot();
    info!(
        phase = %state.phase,
        authenticated = state.authenticated,
        messages_sent = initiator.sent_messages().len(),
        "fixpoll stopped"
    );
    Ok(())
}
