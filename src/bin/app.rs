#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use log::{error, info};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};

use dustbin_firmware::config::{BUILD_VERSION, DEVICE_NAME};
use dustbin_firmware::infrastructure::drivers::{
    EspCamera, EspServo, init_network_stack, wait_for_connection,
};
use dustbin_firmware::infrastructure::services::HttpClassifier;
use dustbin_firmware::infrastructure::tasks::{
    network_runner_task, sorting_task, wifi_connection_task,
};
use dustbin_firmware::infrastructure::types::sorting_usecases;
use dustbin_firmware::{camera_pins, servo_gpio};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    info!("{} firmware {}", DEVICE_NAME, BUILD_VERSION);

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Allocate heap memory (64 + 32 KB), the radio lives on it
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Park the flap over the general bin
    let mut servo = EspServo::from_config(peripherals.LEDC, servo_gpio!(peripherals))
        .expect("Failed to configure servo PWM");
    if let Err(e) = servo.park().await {
        error!("servo: initial move failed: {:?}", e);
    }

    let camera = EspCamera::new(
        peripherals.LCD_CAM,
        peripherals.DMA_CH0,
        peripherals.I2C0,
        camera_pins!(peripherals),
    )
    .await
    .expect("Failed to initialize camera");

    // Initialize network stack and spawn network tasks
    let (stack, runner, controller) =
        init_network_stack(peripherals.WIFI).expect("Failed to start WiFi");
    spawner.spawn(wifi_connection_task(controller)).ok();
    spawner.spawn(network_runner_task(runner)).ok();

    // Wait for network connection before the first upload
    let ip = wait_for_connection(stack).await;
    info!("network: got address {}", ip.address);

    let classifier = HttpClassifier::from_config(stack).expect("Invalid CLASSIFIER_URL");

    let usecases = sorting_usecases(camera, classifier, servo);
    spawner.spawn(sorting_task(usecases)).ok();

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
