/*
 * This module finds details of Windows MSMF capture devices.
 * See:
 * https://learn.microsoft.com/en-us/windows/win32/medfound/enumerating-video-capture-devices
 * https://learn.microsoft.com/en-us/windows/win32/medfound/mf-mt-frame-rate-attribute
 * Use info on using the Rust Windows crate: https://kennykerr.ca/index.html
 */
use crate::error::EnumerationError;
use crate::video_devices::native::{NativeDevice, NativeFormat, NativeResult};
use windows::{
    Win32::{
        Media::MediaFoundation::{
            IMFAttributes,
            IMFActivate,
            IMFMediaSource,
            IMFPresentationDescriptor,
            IMFStreamDescriptor,
            IMFMediaTypeHandler,
            IMFMediaType,
            MFCreateAttributes,
            MFEnumDeviceSources,
            MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE,
            MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE_VIDCAP_GUID,
            MF_DEVSOURCE_ATTRIBUTE_FRIENDLY_NAME,
            MF_MT_FRAME_SIZE,
            MF_MT_FRAME_RATE
        },
        Foundation::{
            BOOL,
            TRUE
        },
        System::WinRT::{
            RoInitialize,
            RoUninitialize,
            RO_INIT_SINGLETHREADED
        }
    },
    core::{
        PWSTR,
        GUID
    }
};
use std::slice;

type Result<T> = std::result::Result<T, EnumerationError>;

pub fn query_native_devices() -> Result<Vec<NativeResult>> {
    using_com_thread(query_native_devices_on_com_thread)
}

/// Calls [RoInitialize](https://learn.microsoft.com/en-us/windows/win32/api/roapi/nf-roapi-roinitialize)
/// before executing the function, and
/// [RoUninitialize](https://learn.microsoft.com/en-us/windows/win32/api/roapi/nf-roapi-rouninitialize) after.
fn using_com_thread<F,T>(func: F) -> Result<T> where F: FnOnce() -> Result<T> {
    // see: https://github.com/microsoft/windows-rs/issues/1169
    unsafe { RoInitialize(RO_INIT_SINGLETHREADED) }.map_err(platform_error)?;
    let result: Result<T> = func();
    unsafe { RoUninitialize() };
    result
}

fn query_native_devices_on_com_thread() -> Result<Vec<NativeResult>> {
    let attrs: IMFAttributes = mf_create_attributes(
        &MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE,
        &MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE_VIDCAP_GUID)?;

    let opt_device_refs: &[Option<IMFActivate>] = mf_enum_device_sources(&attrs)?;

    // A device that fails to activate (e.g. in use elsewhere) is reported on
    // its own rather than failing the whole query.
    Ok(opt_device_refs.iter()
        .flatten()
        .map(build_native_device)
        .collect())
}

fn mf_create_attributes(guidkey: *const GUID, guidvalue: *const GUID) -> Result<IMFAttributes> {
    let mut opt_attribute_store: Option<IMFAttributes> = None;
    unsafe {
        MFCreateAttributes(&mut opt_attribute_store, 1).map_err(platform_error)?;
        let attr: IMFAttributes = opt_attribute_store
            .ok_or(EnumerationError::platform("Failed to create attribute store"))?;
        attr.SetGUID(guidkey, guidvalue).map_err(platform_error)?;
        Ok(attr)
    }
}

fn mf_enum_device_sources<'a>(attrs: &IMFAttributes) -> Result<&'a[Option<IMFActivate>]> {
    let mut device_sources: *mut Option<IMFActivate> = &mut None;
    let mut device_count: u32 = 0;
    unsafe {
        MFEnumDeviceSources(attrs, &mut device_sources, &mut device_count).map_err(platform_error)?;
        Ok(slice::from_raw_parts(device_sources, device_count as usize))
    }
}

fn build_native_device(device_ref: &IMFActivate) -> Result<NativeDevice> {
    let name: String = mf_device_get_allocated_string(device_ref, &MF_DEVSOURCE_ATTRIBUTE_FRIENDLY_NAME)?;
    let formats: Vec<NativeFormat> = with_activated_media_source(device_ref, find_formats_using_source)?;
    Ok(NativeDevice { name, formats })
}

fn mf_device_get_allocated_string(device: &IMFActivate, guidkey: *const GUID) -> Result<String> {
    let mut value: PWSTR = PWSTR::null();
    let mut len: u32 = 0;
    unsafe {
        device.GetAllocatedString(guidkey, &mut value, &mut len).map_err(platform_error)?;
        value.to_string().map_err(|err| EnumerationError::platform(err.to_string()))
    }
}

/// Activates the device to get a media source, which it passes to the function and shuts down afterwards.
fn with_activated_media_source<F,T>(device_ref: &IMFActivate, func: F) -> Result<T> where
    F: Fn(&IMFMediaSource) -> Result<T>
{
    let media_source: IMFMediaSource = unsafe { device_ref.ActivateObject() }.map_err(platform_error)?;
    let result: Result<T> = func(&media_source);
    unsafe { media_source.Shutdown() }.ok();
    result
}

fn find_formats_using_source(media_source: &IMFMediaSource) -> Result<Vec<NativeFormat>> {
    let descriptor: IMFPresentationDescriptor = unsafe { media_source.CreatePresentationDescriptor() }
        .map_err(platform_error)?;
    let desc_count: u32 = unsafe { descriptor.GetStreamDescriptorCount() }.map_err(platform_error)?;

    let mut formats = Vec::<NativeFormat>::new();
    for idx in 0..desc_count {
        if let Some(stream) = get_stream_descriptor_by_idx(&descriptor, idx)? {
            add_formats_for_stream(&stream, &mut formats)?;
        }
    }
    Ok(formats)
}

fn get_stream_descriptor_by_idx(descriptor: &IMFPresentationDescriptor, idx: u32) -> Result<Option<IMFStreamDescriptor>> {
    let mut pf_selected: BOOL = TRUE;
    let mut opt_desc: Option<IMFStreamDescriptor> = None;
    unsafe { descriptor.GetStreamDescriptorByIndex(idx, &mut pf_selected, &mut opt_desc) }
        .map_err(platform_error)?;

    Ok(opt_desc)
}

fn add_formats_for_stream(stream_descriptor: &IMFStreamDescriptor, formats: &mut Vec<NativeFormat>) -> Result<()> {
    let media_type_handler: IMFMediaTypeHandler = unsafe { stream_descriptor.GetMediaTypeHandler() }
        .map_err(platform_error)?;
    let media_type_count: u32 = unsafe { media_type_handler.GetMediaTypeCount() }.map_err(platform_error)?;

    for idx in 0..media_type_count {
        formats.push(get_media_type_format_by_idx(&media_type_handler, idx)?);
    }
    Ok(())
}

fn get_media_type_format_by_idx(media_type_handler: &IMFMediaTypeHandler, idx: u32) -> Result<NativeFormat> {
    let media_type: IMFMediaType = unsafe { media_type_handler.GetMediaTypeByIndex(idx) }.map_err(platform_error)?;
    // Both attributes pack two u32s: width/height and numerator/denominator.
    let fs = unsafe { media_type.GetUINT64(&MF_MT_FRAME_SIZE) }.map_err(platform_error)?;
    let max_fps = unsafe { media_type.GetUINT64(&MF_MT_FRAME_RATE) }
        .ok()
        .and_then(|fr| to_frames_per_second((fr >> 32) as u32, fr as u32));

    Ok(NativeFormat {
        width: (fs >> 32) as u32,
        height: fs as u32,
        max_fps
    })
}

fn to_frames_per_second(numerator: u32, denominator: u32) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

fn platform_error(err: windows::core::Error) -> EnumerationError {
    EnumerationError::platform(err.message().to_string())
}
