mod mock_notifier;
mod mock_registration_repository;

#[allow(unused_imports)]
pub use mock_notifier::MockNotifier;
#[allow(unused_imports)]
pub use mock_registration_repository::MockRegistrationRepository;
