//! finlit-ffi
//!
//! C ABI over finlit-core for the mobile screens: calculators, budget and
//! loan ledger handles backed by a JSON directory, and chat reply clean-up.
//!
//! Status codes: `FINLIT_OK` on success, otherwise one of the `FINLIT_ERR_*`
//! constants with a message written to `out_error` when it is non-null.
//! Strings handed out by this library must be released with
//! [`finlit_string_free`].

use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_double, c_int},
    path::PathBuf,
    ptr,
    sync::Arc,
};

use finlit_core::{
    clean_reply, compound_interest, compute_emi, BudgetDraft, BudgetLedger, CoreError,
    CreditFactors, DeleteChoice, DeleteOutcome, LoanDraft, LoanLedger, PaymentOutcome,
    Persistence, ScoreBand, SystemClock,
};
use finlit_domain::RecordKind;
use finlit_storage_json::JsonFileStore;
use tracing::{debug, warn};
use uuid::Uuid;

pub const FINLIT_OK: c_int = 0;
pub const FINLIT_ERR_NULL: c_int = 1;
pub const FINLIT_ERR_ARGUMENT: c_int = 2;
pub const FINLIT_ERR_VALIDATION: c_int = 3;
pub const FINLIT_ERR_NOT_FOUND: c_int = 4;
pub const FINLIT_ERR_PERSISTENCE: c_int = 5;
/// The caller declined the delete confirmation; nothing changed.
pub const FINLIT_CANCELLED: c_int = 6;
pub const FINLIT_ERR_INTERNAL: c_int = 7;

pub const FINLIT_KIND_INCOME: c_int = 0;
pub const FINLIT_KIND_EXPENSE: c_int = 1;

/// Opaque budget ledger owned by the caller until [`finlit_budget_free`].
pub struct BudgetHandle {
    inner: BudgetLedger,
}

/// Opaque loan ledger owned by the caller until [`finlit_loan_free`].
pub struct LoanHandle {
    inner: LoanLedger,
}

#[repr(C)]
pub struct FfiBudgetAggregates {
    pub total_income: c_double,
    pub total_expense: c_double,
    pub balance: c_double,
    pub record_count: c_int,
}

#[repr(C)]
pub struct FfiCompoundResult {
    pub future_value: c_double,
    pub total_interest: c_double,
}

#[no_mangle]
pub extern "C" fn finlit_compute_emi(
    principal: c_double,
    annual_rate_percent: c_double,
    term_months: u32,
    out_emi: *mut c_double,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if out_emi.is_null() {
        unsafe {
            write_error(out_error, "output pointer is null");
        }
        return FINLIT_ERR_NULL;
    }
    match compute_emi(principal, annual_rate_percent, term_months) {
        Ok(emi) => {
            unsafe {
                *out_emi = emi;
            }
            FINLIT_OK
        }
        Err(err) => unsafe { fail(out_error, err) },
    }
}

#[no_mangle]
pub extern "C" fn finlit_compound_interest(
    principal: c_double,
    annual_rate_percent: c_double,
    years: c_double,
    periods_per_year: c_double,
    out_result: *mut FfiCompoundResult,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if out_result.is_null() {
        unsafe {
            write_error(out_error, "output pointer is null");
        }
        return FINLIT_ERR_NULL;
    }
    match compound_interest(principal, annual_rate_percent, years, periods_per_year) {
        Ok(result) => {
            unsafe {
                (*out_result).future_value = result.future_value;
                (*out_result).total_interest = result.total_interest;
            }
            FINLIT_OK
        }
        Err(err) => unsafe { fail(out_error, err) },
    }
}

/// Returns the simulated score. When `out_band` is non-null it receives
/// 0 (Poor), 1 (Fair), 2 (Good) or 3 (Excellent).
#[no_mangle]
pub extern "C" fn finlit_credit_score(
    payment_history: c_double,
    utilization: c_double,
    credit_age_years: c_double,
    out_band: *mut c_int,
) -> c_int {
    let factors = CreditFactors::new(payment_history, utilization, credit_age_years);
    if !out_band.is_null() {
        unsafe {
            *out_band = band_to_code(factors.band());
        }
    }
    c_int::from(factors.score())
}

#[no_mangle]
pub extern "C" fn finlit_budget_open(
    data_dir: *const c_char,
    out_error: *mut *mut c_char,
) -> *mut BudgetHandle {
    clear_error(out_error);
    let persistence = match unsafe { open_persistence(data_dir) } {
        Ok(persistence) => persistence,
        Err(err) => {
            unsafe {
                write_core_error(out_error, &err);
            }
            return ptr::null_mut();
        }
    };
    let ledger = BudgetLedger::load(persistence, Arc::new(SystemClock));
    Box::into_raw(Box::new(BudgetHandle { inner: ledger }))
}

#[no_mangle]
pub extern "C" fn finlit_budget_free(handle: *mut BudgetHandle) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

#[no_mangle]
pub extern "C" fn finlit_budget_add(
    handle: *mut BudgetHandle,
    amount: *const c_char,
    category: *const c_char,
    kind_code: c_int,
    out_id: *mut *mut c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "budget handle is null");
        }
        return FINLIT_ERR_NULL;
    }
    let kind = match kind_code {
        FINLIT_KIND_INCOME => RecordKind::Income,
        FINLIT_KIND_EXPENSE => RecordKind::Expense,
        other => {
            unsafe {
                write_error(out_error, &format!("unknown record kind {other}"));
            }
            return FINLIT_ERR_ARGUMENT;
        }
    };
    let mut draft = match unsafe { budget_draft(amount, category, kind) } {
        Ok(draft) => draft,
        Err(err) => return unsafe { fail(out_error, err) },
    };

    let ledger = unsafe { &mut (*handle).inner };
    match ledger.add(&mut draft) {
        Ok(id) => {
            unsafe {
                write_string(out_id, id.to_string());
            }
            FINLIT_OK
        }
        Err(err) => unsafe { fail(out_error, err) },
    }
}

/// Deletes a record. The UI asks for confirmation itself and passes the
/// answer as `confirmed`; a declined delete returns [`FINLIT_CANCELLED`].
#[no_mangle]
pub extern "C" fn finlit_budget_delete(
    handle: *mut BudgetHandle,
    record_id: *const c_char,
    confirmed: bool,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "budget handle is null");
        }
        return FINLIT_ERR_NULL;
    }
    let id = match unsafe { uuid_argument(record_id) } {
        Ok(id) => id,
        Err(err) => return unsafe { fail(out_error, err) },
    };

    let choice = if confirmed {
        DeleteChoice::Delete
    } else {
        DeleteChoice::Cancel
    };
    let ledger = unsafe { &mut (*handle).inner };
    match ledger.delete(id, &move |_: &str, _: &str| choice) {
        DeleteOutcome::Removed => FINLIT_OK,
        DeleteOutcome::Cancelled => FINLIT_CANCELLED,
        DeleteOutcome::NotFound => unsafe {
            fail(out_error, CoreError::NotFound(format!("budget record {id}")))
        },
    }
}

#[no_mangle]
pub extern "C" fn finlit_budget_aggregates(
    handle: *const BudgetHandle,
    out_aggregates: *mut FfiBudgetAggregates,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() || out_aggregates.is_null() {
        unsafe {
            write_error(out_error, "budget handle or output aggregates is null");
        }
        return FINLIT_ERR_NULL;
    }
    let ledger = unsafe { &(*handle).inner };
    let aggregates = ledger.aggregates();
    unsafe {
        (*out_aggregates).total_income = aggregates.total_income;
        (*out_aggregates).total_expense = aggregates.total_expense;
        (*out_aggregates).balance = aggregates.balance;
        (*out_aggregates).record_count = c_int::try_from(ledger.len()).unwrap_or(c_int::MAX);
    }
    FINLIT_OK
}

/// Totals plus the chart breakdown, as a JSON object. Slices with a zero
/// amount are omitted.
#[no_mangle]
pub extern "C" fn finlit_budget_aggregates_json(
    handle: *const BudgetHandle,
    out_json: *mut *mut c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() || out_json.is_null() {
        unsafe {
            write_error(out_error, "budget handle or output pointer is null");
        }
        return FINLIT_ERR_NULL;
    }
    let ledger = unsafe { &(*handle).inner };
    match serde_json::to_string(&ledger.aggregates()) {
        Ok(json) => {
            unsafe {
                write_string(out_json, json);
            }
            FINLIT_OK
        }
        Err(err) => unsafe { fail(out_error, err.into()) },
    }
}

/// Newest-first records as a JSON array.
#[no_mangle]
pub extern "C" fn finlit_budget_records_json(
    handle: *const BudgetHandle,
    out_json: *mut *mut c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() || out_json.is_null() {
        unsafe {
            write_error(out_error, "budget handle or output pointer is null");
        }
        return FINLIT_ERR_NULL;
    }
    let ledger = unsafe { &(*handle).inner };
    match serde_json::to_string(ledger.records()) {
        Ok(json) => {
            unsafe {
                write_string(out_json, json);
            }
            FINLIT_OK
        }
        Err(err) => unsafe { fail(out_error, err.into()) },
    }
}

#[no_mangle]
pub extern "C" fn finlit_loan_open(
    data_dir: *const c_char,
    out_error: *mut *mut c_char,
) -> *mut LoanHandle {
    clear_error(out_error);
    let persistence = match unsafe { open_persistence(data_dir) } {
        Ok(persistence) => persistence,
        Err(err) => {
            unsafe {
                write_core_error(out_error, &err);
            }
            return ptr::null_mut();
        }
    };
    let ledger = LoanLedger::load(persistence);
    Box::into_raw(Box::new(LoanHandle { inner: ledger }))
}

#[no_mangle]
pub extern "C" fn finlit_loan_free(handle: *mut LoanHandle) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

#[no_mangle]
pub extern "C" fn finlit_loan_add(
    handle: *mut LoanHandle,
    name: *const c_char,
    amount: *const c_char,
    rate: *const c_char,
    months: *const c_char,
    out_id: *mut *mut c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "loan handle is null");
        }
        return FINLIT_ERR_NULL;
    }
    let mut draft = match unsafe { loan_draft(name, amount, rate, months) } {
        Ok(draft) => draft,
        Err(err) => return unsafe { fail(out_error, err) },
    };

    let ledger = unsafe { &mut (*handle).inner };
    match ledger.add(&mut draft) {
        Ok(id) => {
            unsafe {
                write_string(out_id, id.to_string());
            }
            FINLIT_OK
        }
        Err(err) => unsafe { fail(out_error, err) },
    }
}

/// Records one installment. `out_paid` receives the paid count afterwards;
/// a loan that is already paid off is left unchanged and still reports `FINLIT_OK`.
#[no_mangle]
pub extern "C" fn finlit_loan_mark_paid(
    handle: *mut LoanHandle,
    loan_id: *const c_char,
    out_paid: *mut u32,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "loan handle is null");
        }
        return FINLIT_ERR_NULL;
    }
    let id = match unsafe { uuid_argument(loan_id) } {
        Ok(id) => id,
        Err(err) => return unsafe { fail(out_error, err) },
    };

    let ledger = unsafe { &mut (*handle).inner };
    let paid = match ledger.mark_paid(id) {
        PaymentOutcome::Recorded { paid, .. } => paid,
        PaymentOutcome::AlreadyPaidOff => ledger
            .get(id)
            .map(|loan| loan.paid_installments)
            .unwrap_or_default(),
        PaymentOutcome::NotFound => {
            return unsafe { fail(out_error, CoreError::NotFound(format!("loan {id}"))) }
        }
    };
    if !out_paid.is_null() {
        unsafe {
            *out_paid = paid;
        }
    }
    FINLIT_OK
}

#[no_mangle]
pub extern "C" fn finlit_loan_delete(
    handle: *mut LoanHandle,
    loan_id: *const c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "loan handle is null");
        }
        return FINLIT_ERR_NULL;
    }
    let id = match unsafe { uuid_argument(loan_id) } {
        Ok(id) => id,
        Err(err) => return unsafe { fail(out_error, err) },
    };
    let ledger = unsafe { &mut (*handle).inner };
    if ledger.delete(id) {
        FINLIT_OK
    } else {
        unsafe { fail(out_error, CoreError::NotFound(format!("loan {id}"))) }
    }
}

/// Sum of every loan's EMI; 0 for a null handle.
#[no_mangle]
pub extern "C" fn finlit_loan_total_emi(handle: *const LoanHandle) -> c_double {
    if handle.is_null() {
        return 0.0;
    }
    unsafe { (*handle).inner.total_monthly_emi() }
}

#[no_mangle]
pub extern "C" fn finlit_loan_loans_json(
    handle: *const LoanHandle,
    out_json: *mut *mut c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() || out_json.is_null() {
        unsafe {
            write_error(out_error, "loan handle or output pointer is null");
        }
        return FINLIT_ERR_NULL;
    }
    let ledger = unsafe { &(*handle).inner };
    match serde_json::to_string(ledger.loans()) {
        Ok(json) => {
            unsafe {
                write_string(out_json, json);
            }
            FINLIT_OK
        }
        Err(err) => unsafe { fail(out_error, err.into()) },
    }
}

/// Returns the cleaned reply, or null when `text` is null or not UTF-8.
#[no_mangle]
pub extern "C" fn finlit_clean_reply(text: *const c_char) -> *mut c_char {
    match unsafe { c_string_argument(text) } {
        Ok(raw) => CString::new(clean_reply(&raw))
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut()),
        Err(_) => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn finlit_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(value));
    }
}

fn status_for(err: &CoreError) -> c_int {
    match err {
        CoreError::Validation(_) | CoreError::Parse { .. } => FINLIT_ERR_VALIDATION,
        CoreError::NotFound(_) => FINLIT_ERR_NOT_FOUND,
        CoreError::Persistence(_) | CoreError::Io(_) | CoreError::Serde(_) => {
            FINLIT_ERR_PERSISTENCE
        }
        CoreError::ExternalService(_) => FINLIT_ERR_INTERNAL,
    }
}

fn band_to_code(band: ScoreBand) -> c_int {
    match band {
        ScoreBand::Poor => 0,
        ScoreBand::Fair => 1,
        ScoreBand::Good => 2,
        ScoreBand::Excellent => 3,
    }
}

unsafe fn budget_draft(
    amount: *const c_char,
    category: *const c_char,
    kind: RecordKind,
) -> Result<BudgetDraft, CoreError> {
    Ok(BudgetDraft::new(
        c_string_argument(amount)?,
        c_string_argument(category)?,
        kind,
    ))
}

unsafe fn loan_draft(
    name: *const c_char,
    amount: *const c_char,
    rate: *const c_char,
    months: *const c_char,
) -> Result<LoanDraft, CoreError> {
    Ok(LoanDraft::new(
        c_string_argument(name)?,
        c_string_argument(amount)?,
        c_string_argument(rate)?,
        c_string_argument(months)?,
    ))
}

unsafe fn open_persistence(data_dir: *const c_char) -> Result<Persistence, CoreError> {
    let root = PathBuf::from(c_string_argument(data_dir)?);
    let store = JsonFileStore::new(root)?;
    Ok(Persistence::new(Arc::new(store)))
}

fn clear_error(out_error: *mut *mut c_char) {
    if out_error.is_null() {
        return;
    }
    unsafe {
        *out_error = ptr::null_mut();
    }
}

unsafe fn fail(out_error: *mut *mut c_char, err: CoreError) -> c_int {
    let status = status_for(&err);
    if err.is_validation() {
        debug!(status, error = %err, "ffi call rejected input");
    } else {
        warn!(status, error = %err, "ffi call failed");
    }
    write_core_error(out_error, &err);
    status
}

unsafe fn write_error(out_error: *mut *mut c_char, message: &str) {
    if out_error.is_null() {
        return;
    }
    if let Ok(cstring) = CString::new(message) {
        *out_error = cstring.into_raw();
    }
}

unsafe fn write_core_error(out_error: *mut *mut c_char, err: &CoreError) {
    write_error(out_error, &err.to_string());
}

unsafe fn write_string(target: *mut *mut c_char, value: String) {
    if target.is_null() {
        return;
    }
    if let Ok(cstring) = CString::new(value) {
        *target = cstring.into_raw();
    }
}

unsafe fn c_string_argument(ptr: *const c_char) -> Result<String, CoreError> {
    if ptr.is_null() {
        return Err(CoreError::Validation("null string pointer received".into()));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| s.to_string())
        .map_err(|err| CoreError::Validation(err.to_string()))
}

unsafe fn uuid_argument(ptr: *const c_char) -> Result<Uuid, CoreError> {
    let raw = c_string_argument(ptr)?;
    Uuid::parse_str(raw.trim())
        .map_err(|err| CoreError::Validation(format!("invalid UUID: {err}")))
}
