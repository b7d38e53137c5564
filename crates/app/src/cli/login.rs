use clap::Args;
use jiff::Timestamp;
use mims_app::{
    auth::{Credentials, LoginThrottle, sign_in},
    context::AppContext,
    session::SessionContext,
};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Username
    #[arg(long)]
    pub(crate) username: String,

    /// Password
    #[arg(long, env = "MIMS_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

impl LoginArgs {
    pub(crate) fn credentials(&self) -> Credentials {
        Credentials::new(self.username.as_str(), self.password.as_str())
    }
}

/// Sign `session` in, failing with a printable message.
pub(crate) async fn sign_in_with(
    args: &LoginArgs,
    context: &AppContext,
    session: &mut SessionContext,
) -> Result<(), String> {
    let mut throttle = LoginThrottle::new();

    sign_in(
        context.auth.as_ref(),
        &mut throttle,
        session,
        &args.credentials(),
        Timestamp::now(),
    )
    .await
    .map_err(|error| format!("failed to sign in: {error}"))
}

pub(crate) async fn run(
    args: LoginArgs,
    context: &AppContext,
    mut session: SessionContext,
) -> Result<(), String> {
    sign_in_with(&args, context, &mut session).await?;

    let strength = args.credentials().strength();

    if let Some(user) = session.user() {
        println!("user: {} ({})", user.display_name(), user.role);
        println!("home: {}", user.role.home_route());
    }

    if let Some(token) = session.token() {
        println!("token: {}", token.expose());
        println!("export MIMS_TOKEN to reuse this session");
    }

    println!("password strength: {}", strength.label());

    Ok(())
}
