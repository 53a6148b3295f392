use pgstay_client::forms::{BookingField, BookingForm, ContactField, ContactForm, FormController, FormState};
use pgstay_client::PgStay;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn booking_controller(server: &MockServer) -> (PgStay, FormController<BookingForm>) {
    Mock::given(method("GET"))
        .and(path("/rooms/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 21,
            "property_id": 3,
            "status": "available",
            "base_rent": 8500,
            "security_deposit": 5000
        })))
        .mount(server)
        .await;

    let pgstay = PgStay::new(&server.uri()).unwrap();
    let room = pgstay.rooms().get(21).await.unwrap();
    let form = BookingForm::for_room(&room).unwrap();
    (pgstay, FormController::new(form))
}

fn fill(controller: &mut FormController<BookingForm>) {
    controller.set(BookingField::Name, "Asha Rao");
    controller.set(BookingField::Email, "asha@example.com");
    controller.set(BookingField::Phone, "+91 98450 12345");
    controller.set(BookingField::LeaseStartDate, "2026-11-01");
    controller.set(BookingField::LeaseEndDate, "2027-10-31");
    controller.set(BookingField::PaymentDueDay, "5");
}

#[tokio::test]
async fn test_missing_email_blocks_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book-tenant"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (pgstay, mut controller) = booking_controller(&server).await;
    fill(&mut controller);
    controller.set(BookingField::Email, "");

    let state = controller.submit(&pgstay.bookings()).await;

    assert_eq!(state, FormState::Editing);
    assert_eq!(controller.field_error(BookingField::Email), Some("Email is required"));
    assert_eq!(controller.value(BookingField::Name), "Asha Rao");
}

#[tokio::test]
async fn test_failed_booking_keeps_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book-tenant"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Room is already booked"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (pgstay, mut controller) = booking_controller(&server).await;
    fill(&mut controller);

    let state = controller.submit(&pgstay.bookings()).await;

    assert_eq!(
        state,
        FormState::Failed {
            message: "Room is already booked".to_string()
        }
    );
    assert_eq!(controller.value(BookingField::Email), "asha@example.com");
    assert_eq!(controller.value(BookingField::SecurityDeposit), "5000");

    // Editing again leaves the failed state.
    controller.set(BookingField::Notes, "Can move in a week later");
    assert_eq!(controller.state(), FormState::Editing);
}

#[tokio::test]
async fn test_successful_booking_clears_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book-tenant"))
        .and(body_partial_json(json!({
            "room_id": 21,
            "property_id": 3,
            "rent_amount": 8500.0,
            "security_deposit": 5000.0,
            "lease_start_date": "2026-11-01",
            "payment_due_day": 5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"message": "Booking received for room A-101"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (pgstay, mut controller) = booking_controller(&server).await;
    let mut states = controller.subscribe();
    fill(&mut controller);

    let state = controller.submit(&pgstay.bookings()).await;

    assert_eq!(state.message(), Some("Booking received for room A-101"));
    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), state);
    assert_eq!(controller.value(BookingField::Name), "");
    assert_eq!(controller.value(BookingField::SecurityDeposit), "5000");
    assert_eq!(controller.form().rent_amount(), 8500.0);
}

#[tokio::test]
async fn test_contact_form_falls_back_to_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let pgstay = PgStay::new(&server.uri()).unwrap();
    let mut controller = FormController::new(ContactForm::default());
    controller.set(ContactField::Name, "Ravi");
    controller.set(ContactField::Email, "ravi@example.com");
    controller.set(ContactField::Phone, "9845012345");
    controller.set(ContactField::Message, "Is parking available?");

    let state = controller.submit(&pgstay.contact()).await;

    assert_eq!(state.message(), Some("Thanks! We will get back to you shortly."));
    assert_eq!(controller.value(ContactField::Message), "");
}
