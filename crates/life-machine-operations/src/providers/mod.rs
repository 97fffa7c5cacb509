mod process;
mod registry;
mod webhook;

pub use process::ProcessCommandRunner;
pub use registry::{HttpRegistryClient, NPM_REGISTRY_URL, decode_packument};
pub use webhook::{WEBHOOK_AVATAR_URL, WEBHOOK_USERNAME, WebhookMessage, WebhookNotifier};
