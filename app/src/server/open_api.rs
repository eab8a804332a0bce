use crate::modules::{auth, b2b, billing, booking, common, driver, fleet, pricing};
use crate::server::controller;
use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{InfoBuilder, OpenApiBuilder, ServerBuilder};
use utoipa::{Modify, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        entity::user::Model,
        entity::role::Model,
        entity::booking::Model,
        entity::booking_note::Model,
        entity::taxi_assignment::Model,
        entity::b2b_request::Model,
        entity::b2b_company::Model,
        entity::b2b_booking::Model,
        entity::b2b_payment::Model,
        entity::fleet_vehicle::Model,
        entity::company_fleet::Model,
        entity::pricing_settings::Model,
        entity::driver::Model,

        entity::enums::BookingStatus,
        entity::enums::B2bBookingStatus,
        entity::enums::RequestStatus,
        entity::enums::TaxiAssignStatus,
        entity::enums::AuditAction,

        common::responses::SimpleError,

        auth::dto::SignIn,
        auth::dto::UserDto,
        auth::dto::ProfileDto,
        auth::dto::RegisterUser,
        auth::dto::ResetPassword,
        auth::dto::SignInResponse,
        auth::dto::ConfirmPhoneOtp,
        auth::dto::UpdateProfile,
        auth::dto::SetFirstPassword,
        auth::dto::B2bSignInResponse,
        auth::dto::RequestPasswordReset,

        fleet::dto::CreateFleetVehicle,
        fleet::dto::UpdateFleetVehicle,

        pricing::dto::UpdatePricingSettings,

        driver::dto::CreateDriver,
        driver::dto::UpdateDriver,

        booking::dto::AddNote,
        booking::dto::MarkPaid,
        booking::dto::AssignTaxi,
        booking::dto::BookingRow,
        booking::dto::CompleteTrip,
        booking::dto::CustomerInfo,
        booking::dto::UpdateStatus,
        booking::dto::BookingDetail,
        booking::dto::CancelBooking,
        booking::dto::B2bDispatchRow,
        booking::dto::UpdateB2bStatus,

        b2b::dto::SubmitRequest,
        b2b::dto::ReviewRequest,
        b2b::dto::ApprovedUser,
        b2b::dto::CompanyMember,
        b2b::dto::CompanyDetails,
        b2b::dto::ApprovalOutcome,
        b2b::dto::FleetAssignment,
        b2b::dto::CreditBookingRow,
        b2b::dto::ManageCompanyFleet,
        b2b::dto::RequestWithCompany,
        b2b::dto::CreateCreditBooking,

        billing::dto::RecordPayment,
        billing::dto::MonthlyBucket,
        billing::dto::BillingSummary,
        billing::dto::CompanyBillingView,
    )),
    paths(
        controller::healthcheck,

        auth::routes::me,
        auth::routes::update_me,
        auth::routes::login,
        auth::routes::register,
        auth::routes::b2b_login,
        auth::routes::reset_password,
        auth::routes::b2b_set_password,
        auth::routes::request_phone_otp,
        auth::routes::confirm_phone_otp,
        auth::routes::request_password_reset,

        fleet::routes::get_vehicle,
        fleet::routes::list_vehicles,
        fleet::routes::create_vehicle,
        fleet::routes::update_vehicle,
        fleet::routes::delete_vehicle,
        fleet::routes::list_all_vehicles,

        pricing::routes::get_settings,
        pricing::routes::update_settings,
        pricing::routes::get_public_settings,

        driver::routes::get_driver,
        driver::routes::list_drivers,
        driver::routes::create_driver,
        driver::routes::update_driver,
        driver::routes::delete_driver,

        booking::routes::add_note,
        booking::routes::list_notes,
        booking::routes::my_bookings,
        booking::routes::assign_taxi,
        booking::routes::b2b_mark_paid,
        booking::routes::complete_trip,
        booking::routes::update_status,
        booking::routes::cancel_booking,
        booking::routes::b2b_assign_taxi,
        booking::routes::b2b_complete_trip,
        booking::routes::b2b_update_status,
        booking::routes::b2b_cancel_booking,
        booking::routes::pending_payments,
        booking::routes::completed_history,
        booking::routes::cancelled_history,
        booking::routes::get_booking_ticket,
        booking::routes::list_paid_bookings,
        booking::routes::list_b2b_bookings,
        booking::routes::my_company_bookings,

        b2b::routes::my_fleet,
        b2b::routes::my_company,
        b2b::routes::get_company,
        b2b::routes::get_request,
        b2b::routes::list_requests,
        b2b::routes::list_companies,
        b2b::routes::submit_request,
        b2b::routes::reject_request,
        b2b::routes::approve_request,
        b2b::routes::company_bookings,
        b2b::routes::get_company_fleet,
        b2b::routes::manage_company_fleet,
        b2b::routes::create_credit_booking,

        billing::routes::record_payment,
        billing::routes::my_company_payments,
        billing::routes::company_billing_view,
    ),
    modifiers(&AccessTokenSecurityScheme),
)]
struct ApiDoc;

/// JWT on the Authorization request header, obtained from the login endpoints
struct AccessTokenSecurityScheme;

impl Modify for AccessTokenSecurityScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "access_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

pub fn create_openapi_router() -> Router<controller::AppState> {
    let builder: OpenApiBuilder = ApiDoc::openapi().into();

    let info = InfoBuilder::new()
        .title("UrbanCabz API")
        .description(Some(
            "Taxi booking api: customer accounts, B2B company credit and dispatch.",
        ))
        .version("0.0.1")
        .build();

    // all module routers are nested under the version prefix, the
    // healthcheck is the only path served at the root
    let server = ServerBuilder::new().url("/api/v1").build();

    let api_doc = builder.info(info).servers(Some(vec![server])).build();

    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/docs/openapi.json", api_doc))
        .merge(RapiDoc::new("/docs/openapi.json").path("/rapidoc"))
}
