use clap::Parser;

#[derive(Clone, Parser)]
pub struct HashPasswordParams {
    #[clap(short, long)]
    pub password: String,

    /// bcrypt work factor.
    #[clap(short, long, default_value_t = bcrypt::DEFAULT_COST)]
    pub cost: u32,
}

pub fn hash_password(
    HashPasswordParams { password, cost }: HashPasswordParams,
) -> anyhow::Result<String> {
    if password.is_empty() {
        anyhow::bail!("Refusing to hash an empty password");
    }

    Ok(bcrypt::hash(password, cost)?)
}
