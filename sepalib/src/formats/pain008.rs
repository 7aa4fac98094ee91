//! SEPA-Lastschrifteinzugsauftrag / Direct Debit Initiation
//! (pain.008.001.02), виды поручений CDD (Basislastschrift) и CDB
//! (Firmenlastschrift). Только запись.

use crate::{
    error::{Result, SepaError},
    message::DirectDebitInitiation,
    model::{format_amount, LocalInstrument, SequenceType, Transaction},
    traits::WriteMessage,
};
use quick_xml::{
    events::{BytesDecl, BytesStart, BytesText, Event},
    Writer,
};
use std::io::Write;

pub struct Pain008;

impl WriteMessage for Pain008 {
    fn write<W: Write>(mut w: W, msg: &DirectDebitInitiation) -> Result<()> {
        let mut wr = Writer::new_with_indent(&mut w, b' ', 2);

        wr.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml)?;

        let mut doc = BytesStart::new("Document");
        doc.push_attribute(("xmlns", "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02"));
        doc.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
        doc.push_attribute((
            "xsi:schemaLocation",
            "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02 pain.008.001.02.xsd",
        ));
        wr.write_event(Event::Start(doc)).map_err(xml)?;

        wr.write_event(Event::Start(BytesStart::new("CstmrDrctDbtInitn")))
            .map_err(xml)?;

        write_group_header(&mut wr, msg).map_err(xml)?;
        write_payment_information(&mut wr, msg).map_err(xml)?;

        wr.write_event(Event::End(BytesStart::new("CstmrDrctDbtInitn").to_end()))
            .map_err(xml)?;
        wr.write_event(Event::End(BytesStart::new("Document").to_end()))
            .map_err(xml)?;
        Ok(())
    }
}

/// <GrpHdr> — данные, общие для всех транзакций сообщения.
fn write_group_header<W: Write>(
    wr: &mut Writer<W>,
    msg: &DirectDebitInitiation,
) -> std::result::Result<(), quick_xml::Error> {
    wr.write_event(Event::Start(BytesStart::new("GrpHdr")))?;
    el(wr, "MsgId", msg.message_id())?;
    // 2010-11-21T09:30:47.000Z — миллисекунды всегда нулевые
    let cre_dt_tm = format!("{}.000Z", msg.created_at().format("%Y-%m-%dT%H:%M:%S"));
    el(wr, "CreDtTm", &cre_dt_tm)?;
    el(wr, "NbOfTxs", &msg.transactions().len().to_string())?;
    el(wr, "CtrlSum", &format_amount(msg.ctrl_sum()))?;
    wr.write_event(Event::Start(BytesStart::new("InitgPty")))?;
    el(wr, "Nm", msg.initiator_name())?;
    wr.write_event(Event::End(BytesStart::new("InitgPty").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("GrpHdr").to_end()))?;
    Ok(())
}

/// <PmtInf> — единственный сборник; без установленного кредитора все его
/// поля выводятся пустыми.
fn write_payment_information<W: Write>(
    wr: &mut Writer<W>,
    msg: &DirectDebitInitiation,
) -> std::result::Result<(), quick_xml::Error> {
    let cdtr = msg.creditor();

    wr.write_event(Event::Start(BytesStart::new("PmtInf")))?;
    el(wr, "PmtInfId", &format!("{}-PI001", msg.message_id()))?;
    el(wr, "PmtMtd", "DD")?;
    el(wr, "BtchBookg", "true")?;
    el(wr, "NbOfTxs", &msg.transactions().len().to_string())?;
    el(wr, "CtrlSum", &format_amount(msg.ctrl_sum()))?;

    // <PmtTpInf> — один раз на сборник, не в транзакциях
    wr.write_event(Event::Start(BytesStart::new("PmtTpInf")))?;
    wr.write_event(Event::Start(BytesStart::new("SvcLvl")))?;
    el(wr, "Cd", "SEPA")?;
    wr.write_event(Event::End(BytesStart::new("SvcLvl").to_end()))?;
    wr.write_event(Event::Start(BytesStart::new("LclInstrm")))?;
    el(
        wr,
        "Cd",
        cdtr.map(|c| instrument_code(c.local_instrument)).unwrap_or(""),
    )?;
    wr.write_event(Event::End(BytesStart::new("LclInstrm").to_end()))?;
    el(
        wr,
        "SeqTp",
        cdtr.map(|c| sequence_code(c.sequence_type)).unwrap_or(""),
    )?;
    wr.write_event(Event::End(BytesStart::new("PmtTpInf").to_end()))?;

    el(
        wr,
        "ReqdColltnDt",
        cdtr.and_then(|c| c.requested_collection_date.as_deref())
            .unwrap_or(""),
    )?;

    wr.write_event(Event::Start(BytesStart::new("Cdtr")))?;
    el(wr, "Nm", cdtr.map(|c| c.name.as_str()).unwrap_or(""))?;
    wr.write_event(Event::End(BytesStart::new("Cdtr").to_end()))?;

    // <CdtrAcct><Id><IBAN>
    wr.write_event(Event::Start(BytesStart::new("CdtrAcct")))?;
    wr.write_event(Event::Start(BytesStart::new("Id")))?;
    el(wr, "IBAN", cdtr.map(|c| c.iban.as_str()).unwrap_or(""))?;
    wr.write_event(Event::End(BytesStart::new("Id").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("CdtrAcct").to_end()))?;

    // <CdtrAgt><FinInstnId><BIC>
    wr.write_event(Event::Start(BytesStart::new("CdtrAgt")))?;
    wr.write_event(Event::Start(BytesStart::new("FinInstnId")))?;
    el(wr, "BIC", cdtr.map(|c| c.bic.as_str()).unwrap_or(""))?;
    wr.write_event(Event::End(BytesStart::new("FinInstnId").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("CdtrAgt").to_end()))?;

    el(wr, "ChrgBr", "SLEV")?;

    // <CdtrSchmeId><Id><PrvtId><Othr> — Gläubiger-ID со схемой SEPA
    wr.write_event(Event::Start(BytesStart::new("CdtrSchmeId")))?;
    wr.write_event(Event::Start(BytesStart::new("Id")))?;
    wr.write_event(Event::Start(BytesStart::new("PrvtId")))?;
    wr.write_event(Event::Start(BytesStart::new("Othr")))?;
    el(wr, "Id", cdtr.map(|c| c.scheme_id.as_str()).unwrap_or(""))?;
    wr.write_event(Event::Start(BytesStart::new("SchmeNm")))?;
    el(wr, "Prtry", "SEPA")?;
    wr.write_event(Event::End(BytesStart::new("SchmeNm").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("Othr").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("PrvtId").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("Id").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("CdtrSchmeId").to_end()))?;

    for (i, tx) in msg.transactions().iter().enumerate() {
        write_transaction(wr, msg.message_id(), i, tx)?;
    }

    wr.write_event(Event::End(BytesStart::new("PmtInf").to_end()))?;
    Ok(())
}

/// <DrctDbtTxInf> — одиночная транзакция, в порядке добавления.
fn write_transaction<W: Write>(
    wr: &mut Writer<W>,
    msg_id: &str,
    index: usize,
    tx: &Transaction,
) -> std::result::Result<(), quick_xml::Error> {
    wr.write_event(Event::Start(BytesStart::new("DrctDbtTxInf")))?;

    // <PmtId><EndToEndId> — ID-...-PI001-TI001, счёт с единицы
    wr.write_event(Event::Start(BytesStart::new("PmtId")))?;
    el(
        wr,
        "EndToEndId",
        &format!("{}-PI001-TI{:03}", msg_id, index + 1),
    )?;
    wr.write_event(Event::End(BytesStart::new("PmtId").to_end()))?;

    // <InstdAmt Ccy="EUR">
    let amt = format_amount(tx.instructed_amount);
    wr.write_event(Event::Start(
        BytesStart::new("InstdAmt").with_attributes([("Ccy", "EUR")]),
    ))?;
    wr.write_event(Event::Text(BytesText::new(&amt)))?;
    wr.write_event(Event::End(BytesStart::new("InstdAmt").to_end()))?;

    // <DrctDbtTx><MndtRltdInf> — данные мандата
    wr.write_event(Event::Start(BytesStart::new("DrctDbtTx")))?;
    wr.write_event(Event::Start(BytesStart::new("MndtRltdInf")))?;
    el(wr, "MndtId", &tx.mandate_id)?;
    el(wr, "DtOfSgntr", &tx.date_of_signature)?;
    if let Some(ref orig) = tx.original_mandate_id {
        // изменённый мандат: индикатор + прежняя ID
        el(wr, "AmdmntInd", "true")?;
        wr.write_event(Event::Start(BytesStart::new("AmdmntInfDtls")))?;
        el(wr, "OrgnlMndtId", orig)?;
        wr.write_event(Event::End(BytesStart::new("AmdmntInfDtls").to_end()))?;
    }
    wr.write_event(Event::End(BytesStart::new("MndtRltdInf").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("DrctDbtTx").to_end()))?;

    // <DbtrAgt><FinInstnId><BIC>
    wr.write_event(Event::Start(BytesStart::new("DbtrAgt")))?;
    wr.write_event(Event::Start(BytesStart::new("FinInstnId")))?;
    el(wr, "BIC", &tx.debtor_bic)?;
    wr.write_event(Event::End(BytesStart::new("FinInstnId").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("DbtrAgt").to_end()))?;

    wr.write_event(Event::Start(BytesStart::new("Dbtr")))?;
    el(wr, "Nm", &tx.debtor_name)?;
    wr.write_event(Event::End(BytesStart::new("Dbtr").to_end()))?;

    // <DbtrAcct><Id><IBAN>
    wr.write_event(Event::Start(BytesStart::new("DbtrAcct")))?;
    wr.write_event(Event::Start(BytesStart::new("Id")))?;
    el(wr, "IBAN", &tx.debtor_iban)?;
    wr.write_event(Event::End(BytesStart::new("Id").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("DbtrAcct").to_end()))?;

    // <RmtInf><Ustrd> — назначение платежа, до 140 символов
    wr.write_event(Event::Start(BytesStart::new("RmtInf")))?;
    el(wr, "Ustrd", &tx.remittance_info)?;
    wr.write_event(Event::End(BytesStart::new("RmtInf").to_end()))?;

    wr.write_event(Event::End(BytesStart::new("DrctDbtTxInf").to_end()))?;
    Ok(())
}

fn el<W: Write>(
    wr: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> std::result::Result<(), quick_xml::Error> {
    wr.write_event(Event::Start(BytesStart::new(tag)))?;
    wr.write_event(Event::Text(BytesText::new(text)))?;
    wr.write_event(Event::End(BytesStart::new(tag).to_end()))?;
    Ok(())
}

fn instrument_code(i: LocalInstrument) -> &'static str {
    match i {
        LocalInstrument::Core => "CORE",
        LocalInstrument::Cor1 => "COR1",
        LocalInstrument::B2b => "B2B",
    }
}

fn sequence_code(s: SequenceType) -> &'static str {
    match s {
        SequenceType::Frst => "FRST",
        SequenceType::Rcur => "RCUR",
        SequenceType::Ooff => "OOFF",
        SequenceType::Fnal => "FNAL",
    }
}

fn xml<E: std::fmt::Display>(e: E) -> SepaError {
    SepaError::Xml(e.to_string())
}
