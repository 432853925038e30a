use clap::Args;
use jiff::SignedDuration;
use readitagain_app::{
    auth::{AuthService, NewMember, PgAuthService, TokenSigner},
    database::{self, Db},
    domain::members::records::MemberUuid,
};
use zeroize::Zeroizing;

#[derive(Debug, Args)]
pub(crate) struct CreateMemberArgs {
    /// Login name: 3 to 32 letters, digits or underscores
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    /// Password; prefer the environment variable over the flag
    #[arg(long, env = "MEMBER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Name shown to other members; defaults to the username
    #[arg(long)]
    display_name: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Token signing secret, shared with the HTTP server
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
}

pub(crate) async fn run(args: CreateMemberArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let signer = TokenSigner::new(args.jwt_secret.as_bytes(), SignedDuration::from_mins(30))
        .map_err(|error| format!("invalid token settings: {error}"))?;

    let service = PgAuthService::new(Db::new(pool), signer);

    let member = service
        .register(NewMember {
            uuid: MemberUuid::new(),
            username: args.username,
            email: args.email,
            password: Zeroizing::new(args.password),
            display_name: args.display_name,
        })
        .await
        .map_err(|error| format!("failed to create member: {error}"))?;

    println!("member_uuid: {}", member.uuid);
    println!("username: {}", member.username);

    Ok(())
}
