use crate::commands::Session;
use crate::error::Result;
use crate::output;

pub async fn run(session: &mut Session) -> Result<()> {
    let count = session.load_all().await?;
    output::print_message(&format!(
        "Loaded {count} user{} from {}",
        if count == 1 { "" } else { "s" },
        session.client.endpoint()
    ));
    Ok(())
}
