use anyhow::Result;
use eventlist::api::ApiClient;
use eventlist::store::EventStore;

pub async fn run(client: ApiClient) -> Result<()> {
    let mut store = EventStore::new(client);
    super::reload_and_show(&mut store).await
}
