//! IMCS protocol client
//!
//! One client owns one connection. After the banner is checked the client
//! may log in or register, list open games, and finally either offer a game
//! or accept one. Offering or accepting hands the connection over to a
//! `ServerPlayer`.

use crate::config::ImcsConfig;
use crate::listing::GameListing;
use crate::revision::Revision;
use crate::server_player::ServerPlayer;
use skirmish_core::{Code, Color, LogContext, Result, SkirmishError};
use skirmish_protocol::Conversation;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::info;

/// IMCS status codes
pub mod codes {
    use skirmish_core::Code;

    /// Connect banner: `100 imcs <version>`
    pub const GREETING: Code = Code::Numeric(100);
    /// Offered game was accepted
    pub const OFFER_ACCEPTED: Code = Code::Numeric(102);
    /// Offer acknowledged, waiting for an opponent
    pub const OFFER_WAITING: Code = Code::Numeric(103);
    /// Game started as white
    pub const GAME_STARTED_WHITE: Code = Code::Numeric(105);
    /// Game started as black
    pub const GAME_STARTED_BLACK: Code = Code::Numeric(106);
    /// Offer already declined
    pub const OFFER_DECLINED: Code = Code::Numeric(107);
    /// Offer already accepted
    pub const OFFER_TAKEN: Code = Code::Numeric(108);
    pub const LOGIN_OK: Code = Code::Numeric(201);
    pub const REGISTER_OK: Code = Code::Numeric(202);
    /// Game list follows, ended by `.`
    pub const LIST_FOLLOWS: Code = Code::Numeric(211);
    pub const LOGIN_FAILED: Code = Code::Numeric(401);
    pub const REGISTER_FAILED: Code = Code::Numeric(402);
    pub const NO_SUCH_GAME: Code = Code::Numeric(408);
}

/// Client for an IMCS game server
pub struct ImcsClient {
    io: Conversation,
    revision: Revision,
    username: Option<String>,
    log: LogContext,
}

impl ImcsClient {
    /// Connect over TCP and check the server banner
    pub async fn connect(host: &str, port: u16, config: &ImcsConfig, log: &LogContext) -> Result<Self> {
        info!(section = "IMCS", "Connecting to IMCS at {}:{}", host, port);

        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|e| SkirmishError::Transport(format!("IMCS connect to {}:{} failed: {}", host, port, e)))?;

        Self::from_stream(stream, config, log).await
    }

    /// Run the client over an already-open duplex stream
    pub async fn from_stream<S>(stream: S, config: &ImcsConfig, log: &LogContext) -> Result<Self>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let log = log.named("IMCS");
        let mut io = Conversation::from_stream(stream, log.clone()).with_line_ending(config.line_ending);
        let revision = expect_version(&mut io, &config.accepted_revisions).await?;
        info!(section = %log.name(), "Server speaks IMCS {}", revision);

        Ok(Self {
            io,
            revision,
            username: None,
            log,
        })
    }

    /// `IMCS`, or `IMCS:<user>` once logged in
    pub fn name(&self) -> String {
        match &self.username {
            Some(user) => format!("IMCS:{}", user),
            None => "IMCS".to_string(),
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Authenticate; on success the username becomes part of the client's name.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.io.send_line(&format!("me {} {}", username, password)).await?;

        let msg = self.io.expect(&[codes::LOGIN_OK, codes::LOGIN_FAILED]).await?;
        if msg.code == codes::LOGIN_FAILED {
            return Err(SkirmishError::Authentication(msg.body));
        }

        info!(section = %self.log.name(), "Logged in as \"{}\".", username);
        self.username = Some(username.to_string());
        self.log = self.log.named(self.name());
        self.io.set_log(self.log.clone());
        Ok(())
    }

    /// Create a new account
    pub async fn register(&mut self, username: &str, password: &str) -> Result<()> {
        self.io
            .send_line(&format!("register {} {}", username, password))
            .await?;

        let msg = self.io.expect(&[codes::REGISTER_OK, codes::REGISTER_FAILED]).await?;
        if msg.code == codes::REGISTER_FAILED {
            return Err(SkirmishError::Authentication(msg.body));
        }

        info!(section = %self.log.name(), "Registered new user \"{}\".", username);
        Ok(())
    }

    /// Fetch the current open-game listing, oldest first
    pub async fn list_games(&mut self) -> Result<Vec<GameListing>> {
        self.io.send_line("list").await?;
        self.io.expect(&[codes::LIST_FOLLOWS]).await?;

        let received = self
            .io
            .receive_until(&[Code::END])
            .await?
            .ok_or_else(|| SkirmishError::protocol("", "stream closed during game listing"))?;

        received
            .preceding_lines()
            .map(|line| GameListing::parse(line, self.revision))
            .collect()
    }

    /// Offer a game as `color` and wait until someone accepts it
    pub async fn offer(mut self, color: Color) -> Result<ServerPlayer> {
        self.io.send_line(&format!("offer {}", color.short())).await?;

        let msg = self
            .io
            .expect(&[codes::OFFER_WAITING, codes::OFFER_DECLINED, codes::OFFER_TAKEN])
            .await?;
        let game_id = self
            .revision
            .offer_game_id(&msg.body)
            .ok_or_else(|| SkirmishError::protocol(msg.raw.clone(), "no game id in offer acknowledgment"))?;
        info!(
            section = %self.log.name(),
            "Offered new game as color {} (id: {}).",
            color.short(),
            game_id
        );

        self.io
            .expect(&[
                codes::OFFER_ACCEPTED,
                codes::GAME_STARTED_WHITE,
                codes::GAME_STARTED_BLACK,
            ])
            .await?;
        info!(section = %self.log.name(), "Offer accepted!");

        Ok(self.into_player())
    }

    /// Accept the open game `game_id`, playing `color`
    pub async fn accept(mut self, game_id: i64, color: Color) -> Result<ServerPlayer> {
        let command = if self.revision.accept_takes_color() {
            format!("accept {} {}", game_id, color.short())
        } else {
            format!("accept {}", game_id)
        };
        self.io.send_line(&command).await?;

        let msg = self
            .io
            .expect(&[
                codes::GAME_STARTED_WHITE,
                codes::GAME_STARTED_BLACK,
                codes::NO_SUCH_GAME,
            ])
            .await?;
        if msg.code == codes::NO_SUCH_GAME {
            return Err(SkirmishError::GameNotFound(msg.body));
        }

        info!(
            section = %self.log.name(),
            "Accepted offer as color {} (id: {})",
            color.short(),
            game_id
        );
        Ok(self.into_player())
    }

    /// Say goodbye and release the connection
    pub async fn disconnect(mut self) -> Result<()> {
        self.io.send_line("quit").await?;
        self.io.shutdown().await?;
        info!(section = %self.log.name(), "Disconnected");
        Ok(())
    }

    fn into_player(self) -> ServerPlayer {
        ServerPlayer::new(self.name(), self.io)
    }
}

/// Read the banner and check protocol name and version
async fn expect_version(io: &mut Conversation, accepted: &[Revision]) -> Result<Revision> {
    let msg = io.expect(&[codes::GREETING]).await?;

    let tokens: Vec<&str> = msg.body.split_whitespace().collect();
    let [server, version] = tokens.as_slice() else {
        return Err(SkirmishError::BadVersion(msg.body.clone()));
    };

    if *server != "imcs" {
        return Err(SkirmishError::BadVersion("not imcs".to_string()));
    }

    Revision::parse(version)
        .filter(|r| accepted.contains(r))
        .ok_or_else(|| SkirmishError::BadVersion(version.to_string()))
}
