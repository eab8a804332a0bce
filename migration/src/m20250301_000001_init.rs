use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let statement = r#"
        create table "role" (
            "id" serial primary key,
            "name" varchar(50) not null
        );

        alter table
            "role"
        add
            constraint "role_name_unique" unique ("name");

        create table "user" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "email" varchar(255) not null,
            "password_hash" varchar(255) null,
            "name" varchar(255) null,
            "phone" varchar(30) null,
            "role_id" int not null,
            "is_first_login" boolean not null default false,
            "is_verified" boolean not null default false,
            "last_login_at" timestamptz(0) null,
            "reset_password_token" text null,
            "phone_otp" varchar(10) null,
            "phone_otp_expires_at" timestamptz(0) null
        );

        alter table
            "user"
        add
            constraint "user_email_unique" unique ("email");

        alter table
            "user"
        add
            constraint "user_reset_password_token_unique" unique ("reset_password_token");

        create table "b2b_company" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "company_name" varchar(255) not null,
            "company_email" varchar(255) not null,
            "company_phone" varchar(30) null
        );

        alter table
            "b2b_company"
        add
            constraint "b2b_company_company_email_unique" unique ("company_email");

        create table "b2b_user" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "user_id" int not null,
            "company_id" int not null,
            "is_primary" boolean not null default false
        );

        alter table
            "b2b_user"
        add
            constraint "b2b_user_user_id_unique" unique ("user_id");

        create table "b2b_request" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "contact_name" varchar(255) not null,
            "contact_email" varchar(255) not null,
            "contact_phone" varchar(30) not null,
            "company_name" varchar(255) not null,
            "message" text null,
            "status" varchar(20) not null default 'PENDING',
            "company_id" int null,
            "admin_notes" text null,
            "reviewed_by" int null,
            "reviewed_at" timestamptz(0) null
        );

        create table "fleet_vehicle" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "name" varchar(255) not null,
            "category" varchar(100) null,
            "seats" smallint not null default 4,
            "base_price_per_km" double precision not null,
            "image" varchar(512) null,
            "is_active" boolean not null default true
        );

        create table "company_fleet" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "company_id" int not null,
            "fleet_vehicle_id" int not null,
            "custom_price_per_km" double precision not null,
            "is_active" boolean not null default true
        );

        alter table
            "company_fleet"
        add
            constraint "company_fleet_company_id_fleet_vehicle_id_unique" unique ("company_id", "fleet_vehicle_id");

        create table "booking" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "customer_id" int not null,
            "pickup_location" varchar(512) not null,
            "drop_location" varchar(512) not null,
            "scheduled_at" timestamptz(0) null,
            "status" varchar(20) not null default 'PENDING',
            "taxi_assign_status" varchar(20) not null default 'NOT_ASSIGNED',
            "distance_km" double precision null,
            "estimated_fare" double precision null,
            "total_amount" double precision null,
            "actual_km" double precision null,
            "toll_charges" double precision null,
            "cancel_reason" text null
        );

        create table "b2b_booking" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "company_id" int not null,
            "booked_by" int not null,
            "pickup_location" varchar(512) not null,
            "drop_location" varchar(512) not null,
            "scheduled_at" timestamptz(0) null,
            "distance_km" double precision null,
            "estimated_fare" double precision null,
            "total_amount" double precision not null,
            "car_model" varchar(100) null,
            "status" varchar(20) not null default 'CONFIRMED',
            "taxi_assign_status" varchar(20) not null default 'NOT_ASSIGNED',
            "actual_km" double precision null,
            "toll_charges" double precision null,
            "cancel_reason" text null,
            "payment_mode" varchar(50) null,
            "payment_remarks" varchar(255) null,
            "paid_at" timestamptz(0) null
        );

        create table "taxi_assignment" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "updated_at" timestamptz(0) null,
            "booking_id" int null,
            "b2b_booking_id" int null,
            "driver_name" varchar(255) not null,
            "driver_number" varchar(30) not null,
            "cab_number" varchar(30) not null,
            "cab_name" varchar(100) not null
        );

        alter table
            "taxi_assignment"
        add
            constraint "taxi_assignment_booking_id_unique" unique ("booking_id");

        alter table
            "taxi_assignment"
        add
            constraint "taxi_assignment_b2b_booking_id_unique" unique ("b2b_booking_id");

        create table "b2b_payment" (
            "id" serial primary key,
            "company_id" int not null,
            "amount" double precision not null,
            "payment_mode" varchar(50) not null,
            "reference_no" varchar(100) null,
            "notes" text null,
            "paid_at" timestamptz(0) not null default now(),
            "created_by" int null
        );

        alter table
            "b2b_payment"
        add
            constraint "b2b_payment_amount_positive" check ("amount" > 0);

        create table "booking_note" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "booking_id" int not null,
            "note" text not null,
            "created_by" int null
        );

        create table "pricing_settings" (
            "id" serial primary key,
            "min_km_threshold" double precision not null default 100.0,
            "min_km_airport_apply" boolean not null default false,
            "min_km_oneway_apply" boolean not null default false,
            "min_km_roundtrip_apply" boolean not null default false,
            "updated_at" timestamptz(0) null
        );

        create table "driver" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "name" varchar(255) not null,
            "phone" varchar(30) not null,
            "license_no" varchar(100) null,
            "is_active" boolean not null default true
        );

        alter table
            "driver"
        add
            constraint "driver_phone_unique" unique ("phone");

        create table "audit_log" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "entity_type" varchar(50) not null,
            "entity_id" int not null,
            "action" varchar(10) not null,
            "old_value" jsonb null,
            "new_value" jsonb null,
            "admin_id" int null,
            "reason" varchar(255) null
        );

        alter table
            "user"
        add
            constraint "user_role_id_foreign" foreign key ("role_id") references "role" ("id") on update cascade;

        alter table
            "b2b_user"
        add
            constraint "b2b_user_user_id_foreign" foreign key ("user_id") references "user" ("id") on update cascade on delete cascade;

        alter table
            "b2b_user"
        add
            constraint "b2b_user_company_id_foreign" foreign key ("company_id") references "b2b_company" ("id") on update cascade on delete cascade;

        alter table
            "b2b_request"
        add
            constraint "b2b_request_company_id_foreign" foreign key ("company_id") references "b2b_company" ("id") on update cascade on delete
        set
            null;

        alter table
            "company_fleet"
        add
            constraint "company_fleet_company_id_foreign" foreign key ("company_id") references "b2b_company" ("id") on update cascade on delete cascade;

        alter table
            "company_fleet"
        add
            constraint "company_fleet_fleet_vehicle_id_foreign" foreign key ("fleet_vehicle_id") references "fleet_vehicle" ("id") on update cascade on delete cascade;

        alter table
            "booking"
        add
            constraint "booking_customer_id_foreign" foreign key ("customer_id") references "user" ("id") on update cascade;

        alter table
            "b2b_booking"
        add
            constraint "b2b_booking_company_id_foreign" foreign key ("company_id") references "b2b_company" ("id") on update cascade;

        alter table
            "b2b_booking"
        add
            constraint "b2b_booking_booked_by_foreign" foreign key ("booked_by") references "user" ("id") on update cascade;

        alter table
            "taxi_assignment"
        add
            constraint "taxi_assignment_booking_id_foreign" foreign key ("booking_id") references "booking" ("id") on update cascade on delete cascade;

        alter table
            "taxi_assignment"
        add
            constraint "taxi_assignment_b2b_booking_id_foreign" foreign key ("b2b_booking_id") references "b2b_booking" ("id") on update cascade on delete cascade;

        alter table
            "b2b_payment"
        add
            constraint "b2b_payment_company_id_foreign" foreign key ("company_id") references "b2b_company" ("id") on update cascade;

        alter table
            "booking_note"
        add
            constraint "booking_note_booking_id_foreign" foreign key ("booking_id") references "booking" ("id") on update cascade on delete cascade;
        "#;

        db.execute_unprepared(statement).await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(String::from("cannot be reverted")))
    }
}
