use anyhow::Result;
use eventlist::api::ApiClient;
use eventlist::controller::Controller;
use eventlist::render::HtmlRenderer;
use eventlist::store::EventStore;

/// Render the full page once, as the browser would see it after loading.
pub async fn run(client: ApiClient) -> Result<()> {
    let mut controller = Controller::new(EventStore::new(client), HtmlRenderer::new(std::io::stdout()));
    controller.init().await?;
    Ok(())
}
